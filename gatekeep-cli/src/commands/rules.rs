use gatekeep_security::KNOWN_RULES;

/// Print the names of all recognized rules, one per line.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    for name in KNOWN_RULES {
        println!("{name}");
    }
    Ok(())
}
