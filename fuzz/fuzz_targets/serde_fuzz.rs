#![no_main]

use bgv_fhe::{Poly, Ring};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

const LGD: u32 = 4;
const D: usize = 1 << LGD;
const LGQ: u32 = 60;
const LGM: u32 = 30;

fuzz_target!(|data: &[u8]| {
    let ring = Arc::new(Ring::new(LGD, LGQ, LGM).unwrap());

    let mut vec = [0u64; D];
    let nbytes = std::mem::size_of_val(&vec);
    let blen = nbytes.min(data.len());
    for (i, &byte) in data[..blen].iter().enumerate() {
        let word = i / 8;
        let shift = (i % 8) * 8;
        vec[word] |= (byte as u64) << shift;
    }

    let x = Poly::encode(&ring, &vec);
    let buf = x.to_bytes();
    let y = Poly::from_bytes(&ring, &buf).unwrap();

    assert!(x.ct_eq(&y));
});
