use std::env;
use std::process;

use otp::{generate_code_now, time_remaining, Algorithm, OtpConfig};
use time::OffsetDateTime;

fn main() {
    let args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() || args.len() > 3 {
        eprintln!("Usage: ./make_totp secret [algorithm] [digits]");
        process::exit(2);
    }

    let mut config = OtpConfig::default();
    if let Some(name) = args.get(1) {
        match name.parse::<Algorithm>() {
            Ok(algorithm) => config = config.with_algorithm(algorithm),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(2);
            }
        }
    }
    if let Some(digits) = args.get(2) {
        match digits.parse() {
            Ok(digits) => config = config.with_digits(digits),
            Err(e) => {
                eprintln!("digits: {}", e);
                process::exit(2);
            }
        }
    }

    match generate_code_now(&args[0], &config) {
        Ok(code) => {
            println!("{}", code);
            if let Ok(left) = time_remaining(OffsetDateTime::now_utc(), config.time_step, config.epoch) {
                eprintln!("valid for {}s", left.whole_seconds());
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
