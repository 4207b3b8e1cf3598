#![no_main]
use huff::{CodeTable, HuffmanDecoder, HuffmanEncoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u8>, Vec<u8>)| {
    let (input, noise) = data;

    let encoder = match HuffmanEncoder::from_symbols(&input) {
        Ok(encoder) => encoder,
        Err(_) => {
            assert!(input.is_empty());
            return;
        }
    };
    let bits = encoder.encode(&input).unwrap();
    let table: &CodeTable<u8> = encoder.table();
    assert!(table.is_prefix_free());

    let decoder = HuffmanDecoder::new(table).unwrap();
    assert_eq!(decoder.decode(&bits).unwrap(), input);

    // Arbitrary bits must fail cleanly, never panic.
    let noise = huff::Bits::from_vec(noise);
    let _ = decoder.decode(&noise);
});
