use std::path::Path;

const KNOWN_ALIGNERS: &[&str] = &["simpleaf", "cellranger", "cellrangerarc", "star", "kallisto"];
const ENTRY_FIELDS: &[&str] = &["protocol", "extra_args", "whitelist"];

fn main() {
    let table_path = Path::new("assets/protocols.json");
    validate_table_file(table_path);
    set_build_dependencies();
}

fn validate_table_file(table_path: &Path) {
    // Ensure the protocol table exists at build time
    assert!(
        table_path.exists(),
        "\n\nPROTOCOL TABLE BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the protocol table before building.\n",
        table_path.display()
    );

    let contents = std::fs::read_to_string(table_path).unwrap_or_else(|e| {
        panic!(
            "\n\nPROTOCOL TABLE BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            table_path.display()
        );
    });

    let table: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nPROTOCOL TABLE BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            table_path.display()
        );
    });

    validate_table_structure(&table);
}

fn validate_table_structure(table: &serde_json::Value) {
    let aligners = table.as_object().unwrap_or_else(|| {
        panic!(
            "\n\nPROTOCOL TABLE BUILD ERROR: Root must be a JSON object\n\
             Got: {table}\n"
        );
    });

    let mut total_entries = 0;
    for (aligner, chemistries) in aligners {
        assert!(
            KNOWN_ALIGNERS.contains(&aligner.as_str()),
            "\n\nPROTOCOL TABLE BUILD ERROR: Unknown aligner '{aligner}'\n\
             Expected one of: {}\n",
            KNOWN_ALIGNERS.join(", ")
        );

        let chemistries = chemistries.as_object().unwrap_or_else(|| {
            panic!(
                "\n\nPROTOCOL TABLE BUILD ERROR: Aligner '{aligner}' must map to an object\n\
                 Got: {chemistries}\n"
            );
        });

        for (chemistry, entry) in chemistries {
            validate_entry(aligner, chemistry, entry);
            total_entries += 1;
        }
    }

    println!(
        "cargo:warning=Validated protocol table: {} aligners, {total_entries} entries",
        aligners.len()
    );
}

fn validate_entry(aligner: &str, chemistry: &str, entry: &serde_json::Value) {
    let fields = entry.as_object().unwrap_or_else(|| {
        panic!(
            "\n\nPROTOCOL TABLE BUILD ERROR: Entry '{aligner}/{chemistry}' must be an object\n"
        );
    });

    for key in fields.keys() {
        assert!(
            ENTRY_FIELDS.contains(&key.as_str()),
            "\n\nPROTOCOL TABLE BUILD ERROR: Entry '{aligner}/{chemistry}' has unknown field '{key}'\n"
        );
    }

    let protocol = fields
        .get("protocol")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    assert!(
        !protocol.trim().is_empty(),
        "\n\nPROTOCOL TABLE BUILD ERROR: Entry '{aligner}/{chemistry}' has a missing or empty 'protocol'\n"
    );

    if let Some(whitelist) = fields.get("whitelist").and_then(serde_json::Value::as_str) {
        let path = Path::new(whitelist);
        assert!(
            !path.has_root()
                && !whitelist.starts_with('\\')
                && !whitelist.split(['/', '\\']).any(|c| c == ".."),
            "\n\nPROTOCOL TABLE BUILD ERROR: Entry '{aligner}/{chemistry}' whitelist must be a relative path inside the asset root\n\
             Got: {whitelist}\n"
        );
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the protocol table changes
    println!("cargo:rerun-if-changed=assets/protocols.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
