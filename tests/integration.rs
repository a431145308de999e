use bgv_fhe::{ct_add, ct_mul, Bgv, Poly};

fn small_bgv() -> Bgv {
    // lgd=4 (d=16), lgq=60 over ~30-bit primes, t=65537 -- small enough to
    // run fast while exercising the real RNS/NTT/BGV machinery.
    Bgv::new(4, 60, 30, 65537).unwrap()
}

#[test]
fn test_expected_flow() {
    for _ in 0..20 {
        let bgv = small_bgv();
        let key = bgv.keygen();

        let mut coeffs = vec![0u64; bgv.ring().degree()];
        coeffs[0] = 3;
        coeffs[1] = 5;
        let m = Poly::encode(bgv.ring(), &coeffs);

        let ct = bgv.encrypt(&key.pub_, &m);
        let out = bgv.decrypt(&ct, &key.s).decode(bgv.plaintext_modulus());

        assert_eq!(out[0], 3);
        assert_eq!(out[1], 5);
    }
}

// Mirrors the demo driver's literal addition scenario: [3,5,0,...] + [7,11,0,...].
#[test]
fn test_demo_addition_scenario() {
    let bgv = small_bgv();
    let key = bgv.keygen();

    let mut a = vec![0u64; bgv.ring().degree()];
    a[0] = 3;
    a[1] = 5;
    let mut b = vec![0u64; bgv.ring().degree()];
    b[0] = 7;
    b[1] = 11;

    let ct_a = bgv.encrypt(&key.pub_, &Poly::encode(bgv.ring(), &a));
    let ct_b = bgv.encrypt(&key.pub_, &Poly::encode(bgv.ring(), &b));

    let sum = ct_add(&ct_a, &ct_b).unwrap();
    let out = bgv.decrypt(&sum, &key.s).decode(bgv.plaintext_modulus());

    assert_eq!(out[0], 10);
    assert_eq!(out[1], 16);
}

// Mirrors the demo driver's literal constant-multiplication scenario:
// [4,0,...] * [9,0,...].
#[test]
fn test_demo_multiplication_scenario() {
    let bgv = small_bgv();
    let key = bgv.keygen();

    let mut a = vec![0u64; bgv.ring().degree()];
    a[0] = 4;
    let mut b = vec![0u64; bgv.ring().degree()];
    b[0] = 9;

    let ct_a = bgv.encrypt(&key.pub_, &Poly::encode(bgv.ring(), &a));
    let ct_b = bgv.encrypt(&key.pub_, &Poly::encode(bgv.ring(), &b));

    let prod = ct_mul(&key.eval, &ct_a, &ct_b).unwrap();
    let out = bgv.decrypt(&prod, &key.s).decode(bgv.plaintext_modulus());

    assert_eq!(out[0], 36);
}

#[test]
fn test_addition_is_commutative() {
    let bgv = small_bgv();
    let key = bgv.keygen();

    let mut a = vec![0u64; bgv.ring().degree()];
    a[0] = 12;
    let mut b = vec![0u64; bgv.ring().degree()];
    b[0] = 30;

    let ct_a = bgv.encrypt(&key.pub_, &Poly::encode(bgv.ring(), &a));
    let ct_b = bgv.encrypt(&key.pub_, &Poly::encode(bgv.ring(), &b));

    let ab = ct_add(&ct_a, &ct_b).unwrap();
    let ba = ct_add(&ct_b, &ct_a).unwrap();

    let out_ab = bgv.decrypt(&ab, &key.s).decode(bgv.plaintext_modulus());
    let out_ba = bgv.decrypt(&ba, &key.s).decode(bgv.plaintext_modulus());

    assert_eq!(out_ab, out_ba);
}

#[test]
fn test_multiplication_distributes_over_addition() {
    let bgv = small_bgv();
    let key = bgv.keygen();
    let d = bgv.ring().degree();

    let mut a = vec![0u64; d];
    a[0] = 3;
    let mut b = vec![0u64; d];
    b[0] = 5;
    let mut c = vec![0u64; d];
    c[0] = 7;

    let ct_a = bgv.encrypt(&key.pub_, &Poly::encode(bgv.ring(), &a));
    let ct_b = bgv.encrypt(&key.pub_, &Poly::encode(bgv.ring(), &b));
    let ct_c = bgv.encrypt(&key.pub_, &Poly::encode(bgv.ring(), &c));

    // a * (b + c)
    let b_plus_c = ct_add(&ct_b, &ct_c).unwrap();
    let lhs = ct_mul(&key.eval, &ct_a, &b_plus_c).unwrap();
    let lhs_out = bgv.decrypt(&lhs, &key.s).decode(bgv.plaintext_modulus());

    // a*b + a*c
    let ab = ct_mul(&key.eval, &ct_a, &ct_b).unwrap();
    let ac = ct_mul(&key.eval, &ct_a, &ct_c).unwrap();
    let rhs = ct_add(&ab, &ac).unwrap();
    let rhs_out = bgv.decrypt(&rhs, &key.s).decode(bgv.plaintext_modulus());

    assert_eq!(lhs_out[0], 36); // 3*(5+7)
    assert_eq!(lhs_out[0], rhs_out[0]);
}

#[test]
fn test_key_and_ciphertext_serialization_flow() {
    let bgv = small_bgv();
    let key = bgv.keygen();

    let key_bytes = Bgv::serialize_key(&key);
    let key2 = Bgv::deserialize_key(bgv.ring(), &key_bytes).unwrap();

    let m = Poly::encode(bgv.ring(), &vec![0u64; bgv.ring().degree()]);
    let ct = bgv.encrypt(&key.pub_, &m);
    let ct_bytes = Bgv::serialize_ct(&ct);
    let ct2 = Bgv::deserialize_ct(bgv.ring(), &ct_bytes).unwrap();

    let out1 = bgv.decrypt(&ct, &key.s).decode(bgv.plaintext_modulus());
    let out2 = bgv.decrypt(&ct2, &key2.s).decode(bgv.plaintext_modulus());
    assert_eq!(out1, out2);
}
