//! Extremize `x + y` on the unit circle with Lagrange multipliers.
//!
//! Prints the maximum and then the minimum, and with the `plot` feature opens
//! a window showing the objective surface, the circle, and both extrema.
//! Set `RUST_LOG=debug` to see every solver iteration, tagged with the
//! extremum being searched for.

use std::error::Error;

use lagrange_core::Observer;
use lagrange_multipliers::{
    instance::{self, Extrema, MAXIMUM_GUESS, MINIMUM_GUESS, UnitCircleLagrangian},
    scene::{Scene, SceneConfig},
    stationary::{self, Config, InitialGuess, SolverEvent},
};
use lagrange_observers::{History, TracingObserver};
use lagrange_solvers::equation::hybrid::Action;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let lagrangian = instance::lagrangian();

    let mut logger = TracingObserver::new("search");
    let mut history = History::new();
    let extrema = search_extrema(&lagrangian, &Config::default(), &mut logger, &mut history);

    for result in extrema.iter() {
        match result {
            Ok(candidate) => println!("{candidate}"),
            Err(error) => println!("FAILED: {error}"),
        }
    }

    let scene = Scene::build(&lagrangian, &extrema, &SceneConfig::default())?;
    info!(
        markers = scene.markers.len(),
        rejected = scene.rejected.len(),
        "scene ready"
    );

    show(&scene, &history)
}

/// Runs the maximum search and then the minimum search.
///
/// Every solver iteration goes to both observers. The logger is relabelled
/// with the extremum before each search, and `history` gains one run per
/// search.
fn search_extrema(
    lagrangian: &UnitCircleLagrangian,
    config: &Config,
    logger: &mut TracingObserver,
    history: &mut History,
) -> Extrema {
    let mut search = |guess: &InitialGuess<3>| {
        logger.set_label(guess.extremum.to_string());
        stationary::find_stationary_point_observed(
            lagrangian,
            guess,
            config,
            |event: &SolverEvent<'_, 3>| -> Option<Action> {
                let _: Option<Action> = logger.observe(event);
                history.observe(event)
            },
        )
    };

    let maximum = search(&MAXIMUM_GUESS);
    let minimum = search(&MINIMUM_GUESS);
    Extrema { maximum, minimum }
}

#[cfg(feature = "plot")]
fn show(scene: &Scene, history: &History) -> Result<(), Box<dyn Error>> {
    use lagrange_plot::{SceneApp, ShowConfig};

    let config = ShowConfig::new().title("Extrema of x + y on the unit circle");
    SceneApp::new(scene, &config)
        .with_history(history.runs())
        .run(&config)?;
    Ok(())
}

#[cfg(not(feature = "plot"))]
fn show(_scene: &Scene, _history: &History) -> Result<(), Box<dyn Error>> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use lagrange_multipliers::Extremum;

    #[test]
    fn each_search_is_observed_under_its_own_label() {
        let lagrangian = instance::lagrangian();
        let mut logger = TracingObserver::new("search");
        let mut history = History::new();

        let extrema = search_extrema(&lagrangian, &Config::default(), &mut logger, &mut history);

        let found: Vec<_> = extrema.candidates().map(|c| c.extremum).collect();
        assert_eq!(found, [Extremum::Maximum, Extremum::Minimum]);

        // One history run per search, as long as the search took.
        assert_eq!(history.runs().len(), 2);
        for (run, candidate) in history.runs().iter().zip(extrema.candidates()) {
            assert_eq!(run.len(), candidate.iters);
            assert_eq!(run[0][0], 1.0);
        }

        assert_eq!(logger.label(), "minimum");
    }

    #[test]
    fn failed_searches_still_reach_the_observers() {
        let lagrangian = instance::lagrangian();
        let mut logger = TracingObserver::new("search");
        let mut history = History::new();
        let config = Config {
            solver: lagrange_solvers::equation::hybrid::Config {
                max_iters: 2,
                ..Default::default()
            },
            ..Config::default()
        };

        let extrema = search_extrema(&lagrangian, &config, &mut logger, &mut history);

        assert!(extrema.maximum.is_err());
        assert!(extrema.minimum.is_err());
        assert_eq!(history.runs().len(), 2);
        assert!(history.runs().iter().all(|run| run.len() == 2));
    }
}
