use comfy_table::{ContentArrangement, Table};
use ct_core::TrackerConfig;

pub fn run(config: &TrackerConfig, campaign: Option<&str>, heroes: bool) -> Result<(), String> {
    let catalog = &config.catalog;

    if heroes {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Hero"]);
        for hero in catalog.heroes() {
            table.add_row(vec![hero]);
        }
        println!("{table}");
        println!();
        println!("  {} heroes", catalog.heroes().len());
        return Ok(());
    }

    if let Some(name) = campaign {
        let canonical = catalog
            .find_campaign(name)
            .ok_or_else(|| format!("unknown campaign: \"{name}\""))?;
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["#", "Scenario"]);
        for (i, scenario) in catalog.scenarios(canonical).iter().enumerate() {
            table.add_row(vec![(i + 1).to_string(), scenario.clone()]);
        }
        println!("  {canonical}");
        println!("{table}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Campaign", "Scenarios"]);
    for c in catalog.campaigns().iter().skip(1) {
        table.add_row(vec![c.name.clone(), c.scenarios.join(", ")]);
    }
    println!("{table}");
    println!();
    println!("  {} campaigns", catalog.campaigns().len() - 1);

    Ok(())
}
