//! `coherelab report` — execute a scenario and print the full report.

pub fn run(scenario_path: &str) {
    let scenario = match super::load_scenario(scenario_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let lab = super::execute_scenario(&scenario);

    match lab.report().to_pretty_json() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing report: {e}");
            std::process::exit(1);
        }
    }
}
