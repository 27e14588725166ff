//! Languages Command
//!
//! Lists the registry's language profiles.

use console::style;

use crate::analyzer::LanguageRegistry;
use crate::types::Result;

pub fn run() -> Result<()> {
    let registry = LanguageRegistry::new();

    println!("{}", style("Supported languages").bold());
    for profile in registry.all() {
        println!(
            "  {:<12} extensions: {}",
            style(profile.display_name).cyan(),
            profile.extensions.join(", ")
        );
    }
    println!(
        "\n{} extensions recognized in total",
        registry.supported_extensions().len()
    );
    Ok(())
}
