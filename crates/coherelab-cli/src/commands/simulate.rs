//! `coherelab simulate` — drive randomized sessions through the engine.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use coherelab_core::{Clock, ManualClock, ParamField, Stabilizer, SystemClock};

pub fn run(sessions: usize, seed: Option<u64>, output: Option<&str>) {
    if sessions == 0 {
        eprintln!("Error: --sessions must be at least 1");
        std::process::exit(1);
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let clock = Arc::new(ManualClock::new(SystemClock.now_ms()));
    let mut lab = Stabilizer::with_clock(Arc::clone(&clock));

    println!("Simulating {sessions} randomized stabilization sessions");
    if let Some(s) = seed {
        println!("  Seed: {s}");
    }
    println!();

    for _ in 0..sessions {
        lab.start();
        lab.update(ParamField::MagneticField, rng.random_range(0.0..200.0));
        lab.update(ParamField::ElectricField, rng.random_range(0.0..500.0));
        lab.update(ParamField::TemperatureControl, rng.random_range(0.5..300.0));
        lab.update(ParamField::PressureVacuum, rng.random_range(1.0..2000.0));
        lab.update(
            ParamField::LaserFrequency,
            rng.random_range(400_000_000.0..700_000_000.0),
        );
        lab.update(ParamField::CoherenceTime, rng.random_range(0.0..20_000.0));
        lab.update(
            ParamField::EntanglementDepth,
            f64::from(rng.random_range(1u32..=50)),
        );

        clock.advance(rng.random_range(10_000..180_000));
        lab.finalize();
        clock.advance(rng.random_range(0..60_000));
    }

    super::print_session_table(lab.history());
    println!();
    println!("Decoherence events");
    super::print_events(lab.history());
    super::print_cumulative(&lab);

    if let Some(path) = output {
        super::write_report(&lab, path);
    }
}
