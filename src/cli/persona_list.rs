use crate::core::persona::PersonaCatalog;

pub fn format_persona_list(catalog: &PersonaCatalog) -> Vec<String> {
    catalog
        .list()
        .iter()
        .enumerate()
        .map(|(index, p)| {
            format!(
                "  {}. {} ({}) - {}",
                index + 1,
                p.display_name,
                p.id,
                p.description
            )
        })
        .collect()
}

pub fn list_personas(catalog: &PersonaCatalog) {
    println!("Available characters:\n");
    for line in format_persona_list(catalog) {
        println!("{line}");
    }
    println!("\n💡 Chat with a character directly with:");
    println!("   qanat -c <id>");
}
