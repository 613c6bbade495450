//! Presets and modules listings

use anyhow::Result;
use console::style;
use rubricrank::analyzers::builtin_modules;
use rubricrank::config::ProjectConfig;

pub fn presets(config: &ProjectConfig) -> Result<()> {
    let catalog = config.preset_catalog();

    println!("\n{}\n", style("Presets").bold());
    for preset in catalog.iter() {
        println!("  {}", style(&preset.name).cyan().bold());
        if let Some(description) = &preset.description {
            println!("    {}", style(description).dim());
        }
        for (id, fraction) in preset.normalized() {
            println!("    {:<28} {:>5.1}%", id, fraction * 100.0);
        }
        println!();
    }
    Ok(())
}

pub fn modules(config: &ProjectConfig) -> Result<()> {
    println!("\n{}\n", style("Modules").bold());
    for module in builtin_modules() {
        let module = config.apply_to_module(module);
        let status = if module.enabled {
            style("[on] ").green()
        } else {
            style("[off]").dim()
        };
        println!(
            "  {} {:<28} {:>5.1}%  {}",
            status,
            module.id,
            module.default_weight * 100.0,
            module.display_name
        );
        if let Some(description) = &module.description {
            println!("        {}", style(description).dim());
        }
    }
    println!(
        "\n  Modules not listed here default to {:.0}% before normalization.",
        rubricrank::analyzers::UNKNOWN_MODULE_WEIGHT * 100.0
    );
    Ok(())
}
