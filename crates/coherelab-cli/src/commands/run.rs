//! `coherelab run` — execute a scripted scenario.

pub fn run(scenario_path: &str, output: Option<&str>) {
    let scenario = match super::load_scenario(scenario_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if scenario.sessions.is_empty() {
        eprintln!("Error: scenario '{scenario_path}' has no sessions");
        std::process::exit(1);
    }

    let name = scenario.name.as_deref().unwrap_or(scenario_path);
    println!(
        "Executing scenario: {name} ({} sessions)",
        scenario.sessions.len()
    );
    println!();

    let lab = super::execute_scenario(&scenario);

    super::print_session_table(lab.history());
    println!();
    println!("Decoherence events");
    super::print_events(lab.history());
    super::print_cumulative(&lab);

    if let Some(path) = output {
        super::write_report(&lab, path);
    }
}
