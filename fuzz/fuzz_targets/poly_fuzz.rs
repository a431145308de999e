#![no_main]

use bgv_fhe::{Poly, Ring};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

const LGD: u32 = 4;
const D: usize = 1 << LGD;
const LGQ: u32 = 60;
const LGM: u32 = 30;
const T: u64 = 65537;

fuzz_target!(|data: &[u8]| {
    let ring = Arc::new(Ring::new(LGD, LGQ, LGM).unwrap());

    let mut buf = [0u64; D];
    let nbytes = std::mem::size_of_val(&buf);
    let blen = nbytes.min(data.len());
    for (i, &byte) in data[..blen].iter().enumerate() {
        let word = i / 8;
        let shift = (i % 8) * 8;
        buf[word] |= (byte as u64) << shift;
    }

    let mut p = Poly::encode(&ring, &buf);
    p.intt();
    let res = p.decode(T);

    for i in 0..D {
        assert_eq!(buf[i] % T, res[i] % T);
    }
});
