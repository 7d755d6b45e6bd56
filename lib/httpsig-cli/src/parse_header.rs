use crate::util::{error_kaomoji, field, success_kaomoji};
use httpsig::{cavage, SignatureScheme};

pub fn do_it(header: &str, scheme: SignatureScheme) -> miette::Result<()> {
    let parameters = scheme.unframe(header);
    let parsed = match cavage::parse(parameters) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("Header is invalid {}", error_kaomoji());
            return Err(miette::Error::new(err).with_source_code(parameters.to_string()));
        }
    };

    println!("✅ Header is valid! {}", success_kaomoji());
    println!("{}: {}", field(&"keyId"), parsed.key_id);
    println!(
        "{}: {}",
        field(&"algorithm"),
        parsed.algorithm.unwrap_or("(not specified)")
    );
    println!("{}: {}", field(&"headers"), parsed.headers.join(" "));

    Ok(())
}
