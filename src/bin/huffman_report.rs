use huff::table::code_string;

fn main() -> Result<(), huff::Error> {
    let message = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "The bird is the word".to_string());

    let encoded = huff::encode_str(&message)?;
    let stats = encoded.stats;

    println!("The size of the data is: {} bits", stats.fixed_width_bits(8));
    println!("The content of the data is: {}", message);
    println!();
    println!("The size of the encoded data is: {} bits", stats.encoded_bits);
    println!("The content of the encoded data is: {}", code_string(&encoded.bits));
    println!(
        "Ratio: {:.3} vs 8-bit, {:.3} vs {}-bit fixed width ({:.2} bits/symbol)",
        stats.ratio(8),
        stats.ratio(stats.uniform_code_width()),
        stats.uniform_code_width(),
        stats.bits_per_symbol()
    );
    println!();
    print!("{}", encoded.table);
    println!();

    let decoded = huff::decode_str(&encoded.bits, &encoded.table)?;
    println!("The size of the decoded data is: {} bits", decoded.chars().count() * 8);
    println!("The content of the decoded data is: {}", decoded);
    Ok(())
}
