//! The `quadforge init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("quadforge.toml").exists() {
        println!("quadforge.toml already exists, skipping.");
    } else {
        std::fs::write("quadforge.toml", SAMPLE_CONFIG)?;
        println!("Created quadforge.toml");
    }

    std::fs::create_dir_all("item-sets")?;
    let example_path = Path::new("item-sets/example.toml");
    if example_path.exists() {
        println!("item-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ITEM_SET)?;
        println!("Created item-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quadforge validate --item-set item-sets/example.toml");
    println!("  2. Run: quadforge generate --item-set item-sets/example.toml --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quadforge configuration

# Fixed seed for reproducible choice layouts. Omit to draw a new one per run.
# seed = 42

max_choice_attempts = 16
output_dir = "./quadforge-results"
default_format = "json"
"#;

const EXAMPLE_ITEM_SET: &str = r#"[item_set]
id = "example"
name = "Example Item Set"
description = "A few quadratics to get started"

[[items]]
id = "integer_roots"
a = 1
b = 6
c = 5
tags = ["rational"]

[[items]]
id = "fraction_roots"
a = 2
b = -7
c = 3
tags = ["rational"]

[[items]]
id = "surd_roots"
a = 1
b = 4
c = 1
tags = ["irrational"]

[[items]]
id = "golden_ratio"
a = 1
b = -1
c = -1
prompt = "Find both roots of the equation in simplest radical form."
tags = ["irrational"]
"#;
