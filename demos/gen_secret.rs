use otp_authenticator::{Authenticator, Secret};

fn main() {
    let secret = Secret::generate(16).unwrap();
    let authenticator = Authenticator::default();

    println!(
        "secret: {} ; code: {} ; rotates in: {}s",
        secret,
        authenticator.current_code(&secret.to_string()).unwrap(),
        authenticator.ttl().unwrap()
    )
}
