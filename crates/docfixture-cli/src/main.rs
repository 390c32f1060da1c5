use std::process;

fn main() {
    match docfixture_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error creating documents: {err:#}");
            process::exit(1);
        }
    }
}
