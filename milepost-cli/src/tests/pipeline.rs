//! Pipeline tests running the whole render against a fixture cache.

use super::helpers::{Workspace, milepost_group};
use super::*;
use milepost_data::fetch::StubSource;
use milepost_data::test_support::{rect_ring, shapefile_archive};
use rstest::rstest;
use std::fs;

#[rstest]
fn warm_cache_renders_one_mills_milepost() {
    let workspace = Workspace::new();
    workspace.warm_cache(&[("mills", 53.8, -1.55)]);
    let source = StubSource::new();

    let path = render_with_source(&workspace.config(false), &source).expect("render succeeds");

    assert_eq!(path, workspace.output_dir().join("map-light.svg"));
    assert_eq!(source.request_count(), 0, "warm cache must stay offline");
    let svg = fs::read_to_string(&path).expect("read map");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r##"fill="#b8e0f3""##));
    let group = milepost_group(&svg);
    assert_eq!(group.matches("<circle").count(), 1, "{group}");
    assert!(group.contains(r##"fill="#ff4200""##), "{group}");
    assert!(group.contains(r##"stroke="#000000""##), "{group}");
}

#[rstest]
fn unknown_mileposts_are_loaded_but_not_drawn() {
    let workspace = Workspace::new();
    workspace.warm_cache(&[("unknown_value", 53.8, -1.55), ("rowe", 52.48, -1.9)]);

    let path = render_with_source(&workspace.config(true), &StubSource::new())
        .expect("render succeeds");

    let svg = fs::read_to_string(&path).expect("read map");
    assert!(path.as_str().ends_with("map-dark.svg"));
    assert!(svg.contains(r##"fill="#111111""##));
    let group = milepost_group(&svg);
    assert_eq!(group.matches("<circle").count(), 1, "{group}");
    assert!(group.contains(r##"fill="#58b53d""##), "{group}");
}

#[rstest]
fn lakes_leave_holes_in_the_land() {
    let workspace = Workspace::new();
    workspace.warm_cache(&[]);

    let path = render_with_source(&workspace.config(false), &StubSource::new())
        .expect("render succeeds");

    let svg = fs::read_to_string(&path).expect("read map");
    let land_start = svg.find(r#"id="land""#).expect("land group");
    let land = svg
        .get(land_start..)
        .and_then(|rest| rest.find("</g>").and_then(|end| rest.get(..end)))
        .expect("land group closes");
    let subpaths = land.matches('M').count();
    assert_eq!(subpaths, 2, "expected the land exterior and one lake hole");
}

#[rstest]
fn rerunning_with_a_warm_cache_is_stable() {
    let workspace = Workspace::new();
    workspace.warm_cache(&[("mccoll", 56.0, -3.2)]);
    let config = workspace.config(false);

    let first_path = render_with_source(&config, &StubSource::new()).expect("first render");
    let first = fs::read_to_string(&first_path).expect("read first map");
    let second_path = render_with_source(&config, &StubSource::new()).expect("second render");
    let second = fs::read_to_string(&second_path).expect("read second map");

    assert_eq!(first, second);
}

#[rstest]
fn cold_cache_is_filled_through_the_source() {
    let workspace = Workspace::new();
    let mut source = StubSource::new();
    for dataset in milepost_data::ShapeDataset::ALL {
        let url = dataset.url(NATURAL_EARTH_BASE_URL);
        let stem = milepost_data::fetch::cache_stem(&url)
            .expect("dataset stem")
            .to_owned();
        let polygon = if dataset == milepost_data::ShapeDataset::Land {
            rect_ring(-8.0, 50.0, 2.0, 59.0)
        } else {
            rect_ring(170.0, -40.0, 171.0, -39.0)
        };
        source = source.with_response(format!("/{stem}.zip"), shapefile_archive(&stem, &[vec![polygon]]));
    }
    let extract = milepost_data::test_support::osm_xml(&[
        milepost_data::test_support::FixtureNode::milepost(7, 51.5, -0.12, "dudgeon"),
    ]);
    source = source.with_response("interpreter", extract.into_bytes());

    let path = render_with_source(&workspace.config(false), &source).expect("render succeeds");

    assert_eq!(source.request_count(), 6);
    let svg = fs::read_to_string(&path).expect("read map");
    assert!(milepost_group(&svg).contains(r##"fill="#fff020""##));
}

#[rstest]
fn failed_download_leaves_no_map() {
    let workspace = Workspace::new();
    let source = StubSource::new();

    let err = render_with_source(&workspace.config(false), &source).expect_err("nothing to fetch");

    match err {
        CliError::Fetch(milepost_data::FetchError::Download { attempts, .. }) => {
            assert_eq!(attempts, 5);
        }
        other => panic!("expected a download failure, found {other:?}"),
    }
    assert!(!workspace.output_dir().join("map-light.svg").exists());
}
