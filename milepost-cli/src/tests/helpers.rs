//! Test helpers for fixture caches and layered configuration.

use super::*;
use milepost_data::ShapeDataset;
use milepost_data::test_support::{FixtureCache, FixtureNode, rect_ring};
use tempfile::TempDir;

/// A temporary workspace with `cache/` and `output/` directories.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Self { _dir: dir, root }
    }

    pub(super) fn cache_dir(&self) -> Utf8PathBuf {
        self.root.join("cache")
    }

    pub(super) fn output_dir(&self) -> Utf8PathBuf {
        self.root.join("output")
    }

    /// Fill the cache with land over the whole clip region, one lake and
    /// the given mileposts.
    pub(super) fn warm_cache(&self, mileposts: &[(&str, f64, f64)]) {
        let mut cache = FixtureCache::default()
            .with_shapes(
                ShapeDataset::Land,
                vec![vec![rect_ring(-12.0, 48.0, 4.0, 62.0)]],
            )
            .with_shapes(
                ShapeDataset::Lakes,
                vec![vec![rect_ring(-3.1, 54.3, -2.9, 54.5)]],
            );
        for (id, &(value, lat, lon)) in (1_u64..).zip(mileposts) {
            cache = cache.with_node(FixtureNode::milepost(id, lat, lon, value));
        }
        cache.write(&self.cache_dir());
    }

    /// Configuration pointing at this workspace.
    pub(super) fn config(&self, dark: bool) -> MapConfig {
        MapConfig::try_from(RenderArgs {
            dark,
            cache_dir: Some(self.cache_dir()),
            output_dir: Some(self.output_dir()),
            ..RenderArgs::default()
        })
        .expect("valid configuration")
    }
}

/// The `<g id="mileposts">` element of a rendered map.
pub(super) fn milepost_group(svg: &str) -> &str {
    let start = svg.find(r#"id="mileposts""#).expect("milepost group");
    let end = svg
        .get(start..)
        .and_then(|rest| rest.find("</g>"))
        .expect("group closes");
    svg.get(start..start + end).expect("group slice")
}

/// Overrides supplied by a configuration file or environment layer.
#[derive(Debug, Clone, Default)]
pub(super) struct LayerOverrides {
    pub(super) cache_dir: Option<Utf8PathBuf>,
    pub(super) shape_attempts: Option<u32>,
}

/// Merge file and environment layers beneath CLI arguments, CLI first.
pub(super) fn merge_layers(
    mut cli_args: RenderArgs,
    file_layer: Option<LayerOverrides>,
    env_layer: Option<LayerOverrides>,
) -> Result<MapConfig, CliError> {
    merge_field(
        &mut cli_args.cache_dir,
        extract_field(&env_layer, |layer| &layer.cache_dir),
        extract_field(&file_layer, |layer| &layer.cache_dir),
    );
    merge_field(
        &mut cli_args.shape_attempts,
        extract_field(&env_layer, |layer| &layer.shape_attempts),
        extract_field(&file_layer, |layer| &layer.shape_attempts),
    );
    MapConfig::try_from(cli_args)
}

fn merge_field<T: Clone>(target: &mut Option<T>, env_value: Option<T>, file_value: Option<T>) {
    if target.is_none()
        && let Some(value) = env_value.or(file_value)
    {
        *target = Some(value);
    }
}

fn extract_field<T: Clone>(
    layer: &Option<LayerOverrides>,
    accessor: fn(&LayerOverrides) -> &Option<T>,
) -> Option<T> {
    layer.as_ref().and_then(|entry| accessor(entry).clone())
}
