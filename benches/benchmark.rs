use bgv_fhe::{ct_add, ct_mul, Bgv, Poly};
use criterion::{criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    let bgv = Bgv::new(8, 120, 30, 65537).unwrap();
    let key = bgv.keygen();

    let mut coeffs = vec![0u64; bgv.ring().degree()];
    coeffs[0] = 3;
    let m = Poly::encode(bgv.ring(), &coeffs);
    let ct_a = bgv.encrypt(&key.pub_, &m);
    let ct_b = bgv.encrypt(&key.pub_, &m);

    c.bench_function("bgv keygen", |b| b.iter(|| bgv.keygen()));
    c.bench_function("bgv encrypt", |b| b.iter(|| bgv.encrypt(&key.pub_, &m)));
    c.bench_function("bgv decrypt", |b| b.iter(|| bgv.decrypt(&ct_a, &key.s)));
    c.bench_function("bgv ct_add", |b| b.iter(|| ct_add(&ct_a, &ct_b).unwrap()));
    c.bench_function("bgv ct_mul", |b| b.iter(|| ct_mul(&key.eval, &ct_a, &ct_b).unwrap()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
