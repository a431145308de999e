#![no_main]

use bgv_fhe::{Bgv, Poly};
use libfuzzer_sys::fuzz_target;

const LGD: u32 = 4;
const D: usize = 1 << LGD;
const LGQ: u32 = 60;
const LGM: u32 = 30;
const T: u64 = 65537;

fuzz_target!(|data: &[u8]| {
    let bgv = Bgv::new(LGD, LGQ, LGM, T).unwrap();
    let key = bgv.keygen();

    let mut buf = [0u64; D];
    let nbytes = std::mem::size_of_val(&buf);
    let blen = nbytes.min(data.len());
    for (i, &byte) in data[..blen].iter().enumerate() {
        let word = i / 8;
        let shift = (i % 8) * 8;
        buf[word] |= (byte as u64) << shift;
    }

    let p = Poly::encode(bgv.ring(), &buf);
    let ct = bgv.encrypt(&key.pub_, &p);
    let r = bgv.decrypt(&ct, &key.s);
    let res = r.decode(T);

    for i in 0..D {
        assert_eq!(buf[i] % T, res[i] % T);
    }
});
