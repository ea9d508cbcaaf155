//! Behaviour-driven step definitions driving the render command scenarios.

use super::helpers::{LayerOverrides, merge_layers};
use super::*;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

const CLI_CACHE_DIR: &str = "cli-cache";
const FILE_CACHE_DIR: &str = "file-cache";
const OUTPUT_DIR: &str = "maps";

/// Aggregates scenario state so each step only needs a single world
/// argument.
#[derive(Debug, Default)]
struct RenderWorld {
    cli_args: RefCell<Vec<String>>,
    cli_result: RefCell<Option<Result<MapConfig, CliError>>>,
    config_layer: RefCell<Option<LayerOverrides>>,
    env_layer: RefCell<Option<LayerOverrides>>,
}

impl RenderWorld {
    fn config(&self) -> MapConfig {
        let borrowed = self.cli_result.borrow();
        match borrowed.as_ref().expect("result recorded") {
            Ok(config) => config.clone(),
            Err(err) => panic!("expected success, found {err:?}"),
        }
    }
}

#[fixture]
fn world() -> RenderWorld {
    RenderWorld::default()
}

#[given("I pass the dark flag and an output directory")]
fn cli_dark_flag(#[from(world)] world: &RenderWorld) {
    world.cli_args.borrow_mut().extend([
        "--dark".to_owned(),
        "--output-dir".to_owned(),
        OUTPUT_DIR.to_owned(),
    ]);
}

#[given("I pass zero shape attempts")]
fn cli_zero_attempts(#[from(world)] world: &RenderWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_SHAPE_ATTEMPTS}"), "0".to_owned()]);
}

#[given("the cache directory and shape attempts are provided via a config file")]
fn provided_via_config(#[from(world)] world: &RenderWorld) {
    *world.config_layer.borrow_mut() = Some(LayerOverrides {
        cache_dir: Some(Utf8PathBuf::from(FILE_CACHE_DIR)),
        shape_attempts: Some(2),
    });
}

#[given("the shape attempts are overridden via environment variables")]
fn attempts_overridden_by_env(#[from(world)] world: &RenderWorld) {
    *world.env_layer.borrow_mut() = Some(LayerOverrides {
        shape_attempts: Some(9),
        ..LayerOverrides::default()
    });
}

#[given("I pass the cache directory with CLI flags")]
fn cli_cache_dir(#[from(world)] world: &RenderWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend(["--cache-dir".to_owned(), CLI_CACHE_DIR.to_owned()]);
}

#[when("I configure the render command")]
fn configure_render(#[from(world)] world: &RenderWorld) {
    let mut invocation = vec!["milepost-map".to_owned()];
    invocation.extend(world.cli_args.borrow().iter().cloned());
    let file_layer = world.config_layer.borrow().clone();
    let env_layer = world.env_layer.borrow().clone();
    let outcome = RenderArgs::try_parse_from(invocation)
        .map_err(CliError::ArgumentParsing)
        .and_then(|args| merge_layers(args, file_layer, env_layer));
    world.cli_result.replace(Some(outcome));
}

#[then("the map is written to the dark map file in that directory")]
fn writes_dark_map(#[from(world)] world: &RenderWorld) {
    let config = world.config();
    assert_eq!(config.mode, ColorMode::Dark);
    assert_eq!(
        config.output_path(),
        Utf8PathBuf::from(OUTPUT_DIR).join("map-dark.svg")
    );
}

#[then("the CLI reports that the \"shape-attempts\" value is invalid")]
fn reports_invalid_attempts(#[from(world)] world: &RenderWorld) {
    let borrowed = world.cli_result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::InvalidAttempts { field, value } => {
            assert_eq!(*field, ARG_SHAPE_ATTEMPTS);
            assert_eq!(*value, 0);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[then("CLI and environment layers override configuration defaults")]
fn precedence_holds(#[from(world)] world: &RenderWorld) {
    let config = world.config();
    assert_eq!(config.cache_dir, Utf8PathBuf::from(CLI_CACHE_DIR));
    assert_eq!(config.fetch.shape_retry.attempts(), 9);
}

macro_rules! register_render_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/render_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RenderWorld) {
            let _ = world;
        }
    };
}

register_render_scenario!(dark_flag_selection, "selecting the dark map via CLI flags");
register_render_scenario!(rejecting_zero_attempts, "rejecting zero shape attempts");
register_render_scenario!(
    layering_cli_config_env,
    "layering CLI, config file, and environment values"
);
