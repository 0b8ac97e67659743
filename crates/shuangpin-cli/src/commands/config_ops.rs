use std::fs;
use std::process;

use shuangpin_core::initials::InitialTable;
use shuangpin_core::settings;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    let tables: Vec<&str> = s.tables.iter().map(|t| t.name.as_str()).collect();
    println!(
        "OK: {} source files, tables: {}",
        s.sources.files.len(),
        tables.join(", ")
    );
}

/// `key  initial` lines in key order.
pub fn initials_listing(table: &InitialTable) -> Vec<String> {
    table
        .keys()
        .map(|(key, initial)| format!("{key}  {initial}"))
        .collect()
}

pub fn initials() {
    let table = die!(InitialTable::new(), "Error: invalid initial table: {}");
    for line in initials_listing(&table) {
        println!("{line}");
    }
}
