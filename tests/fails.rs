use bgv_fhe::{ct_add, ct_mul, Bgv, Poly, Ring};
use rand::RngCore;

// Highlights validation opportunities around malformed wire data.
#[test]
fn fails_deserialize() {
    let mut rng = rand::thread_rng();
    let bgv = Bgv::new(4, 60, 30, 65537).unwrap();

    for _i in 0..100 {
        let mut bad_poly_bytes = vec![0u8; bgv.ring().residues() * bgv.ring().degree() * 8 - 1];
        rng.fill_bytes(&mut bad_poly_bytes);
        let bad_poly = Poly::from_bytes(bgv.ring(), &bad_poly_bytes);
        assert!(bad_poly.is_err());

        let mut bad_key_bytes = vec![0u8; 37];
        rng.fill_bytes(&mut bad_key_bytes);
        let bad_key = Bgv::deserialize_key(bgv.ring(), &bad_key_bytes);
        assert!(bad_key.is_err());

        let bad_ct = Bgv::deserialize_ct(bgv.ring(), &[0u8; 3]);
        assert!(bad_ct.is_err());
    }
}

#[test]
fn fails_ring_params() {
    assert!(Ring::new(0, 40, 20).is_err());
    assert!(Ring::new(4, 40, 0).is_err());
    assert!(Ring::new(4, 40, 63).is_err());
}

#[test]
fn fails_ct_add_length_mismatch() {
    let bgv = Bgv::new(4, 60, 30, 65537).unwrap();
    let key = bgv.keygen();
    let m = Poly::encode(bgv.ring(), &vec![0u64; bgv.ring().degree()]);
    let fresh = bgv.encrypt(&key.pub_, &m);

    let a0 = bgv.encrypt(&key.pub_, &m);
    let b0 = bgv.encrypt(&key.pub_, &m);
    let tensor = vec![
        Poly::mul(&a0[0], &b0[0]),
        Poly::mul(&a0[0], &b0[1]),
        Poly::mul(&a0[1], &b0[1]),
    ];

    assert!(ct_add(&fresh, &tensor).is_err());
}

#[test]
fn fails_ct_mul_on_relinearized_operand_reused_as_tensor() {
    let bgv = Bgv::new(4, 60, 30, 65537).unwrap();
    let key = bgv.keygen();
    let m = Poly::encode(bgv.ring(), &vec![0u64; bgv.ring().degree()]);
    let a = bgv.encrypt(&key.pub_, &m);
    let b = bgv.encrypt(&key.pub_, &m);

    // A length-3 (pre-relinearization) ciphertext is not a valid ct_mul operand.
    let tensor = vec![
        Poly::mul(&a[0], &b[0]),
        Poly::mul(&a[0], &b[1]),
        Poly::mul(&a[1], &b[1]),
    ];
    assert!(ct_mul(&key.eval, &tensor, &b).is_err());
    assert!(ct_mul(&key.eval, &a, &tensor).is_err());
}
