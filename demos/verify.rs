use otp_authenticator::Authenticator;

fn main() {
    let secret = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";
    let authenticator = Authenticator::default();

    let code = authenticator.current_code(secret).unwrap();
    println!("code: {}", code);

    // Accept one step of clock drift on either side.
    let valid = authenticator.verify(secret, &code, 1).unwrap();
    println!("valid: {}", valid);
}
