use std::io::{self, Seek, SeekFrom, Write};

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use milepost_fs::{ensure_dir, file_exists, rename_file};
use tempfile::NamedTempFile;
use zip::result::ZipError;

use super::source::DatasetSource;
use super::{
    CacheLayout, CacheManifest, FetchError, FetchOptions, PointQuery, RetryPolicy, ShapeDataset,
    ShapePaths, cache_stem,
};

const SHAPE_MEMBER_EXTENSIONS: [&str; 2] = ["dbf", "shp"];

fn prepare_cache(cache: &CacheLayout) -> Result<(), FetchError> {
    ensure_dir(cache.root()).map_err(|source| FetchError::CreateCacheDir {
        path: cache.root().to_path_buf(),
        source,
    })
}

fn is_cached(path: &Utf8Path) -> Result<bool, FetchError> {
    file_exists(path).map_err(|source| FetchError::InspectCache {
        path: path.to_path_buf(),
        source,
    })
}

/// Download `url` into a temporary file in `dir`, retrying per `retry`.
async fn download_with_retry<S: DatasetSource + ?Sized>(
    source: &S,
    url: &str,
    dir: &Utf8Path,
    retry: RetryPolicy,
) -> Result<NamedTempFile, FetchError> {
    let attempts = retry.attempts();
    let mut attempt = 1;
    loop {
        let mut file = NamedTempFile::new_in(dir).map_err(|source| FetchError::WriteArchive {
            path: dir.to_path_buf(),
            source,
        })?;
        match source.download(url, file.as_file_mut()).await {
            Ok(bytes) => {
                file.flush().map_err(|source| FetchError::WriteArchive {
                    path: dir.to_path_buf(),
                    source,
                })?;
                debug!("downloaded {bytes} bytes from {url}");
                return Ok(file);
            }
            Err(err) if attempt < attempts => {
                warn!("download attempt {attempt}/{attempts} for {url} failed: {err}");
                attempt += 1;
            }
            Err(err) => {
                return Err(FetchError::Download {
                    url: url.to_owned(),
                    attempts,
                    source: err,
                });
            }
        }
    }
}

fn stage_member(
    zip: &mut zip::ZipArchive<&mut std::fs::File>,
    url: &str,
    name: &str,
    root: &Utf8Path,
) -> Result<(NamedTempFile, Utf8PathBuf), FetchError> {
    let mut entry = match zip.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(FetchError::MissingArchiveMember {
                url: url.to_owned(),
                member: name.to_owned(),
            });
        }
        Err(source) => {
            return Err(FetchError::Archive {
                url: url.to_owned(),
                source,
            });
        }
    };
    let stage_error = |source| FetchError::PrepareExtract {
        path: root.to_path_buf(),
        source,
    };
    let mut staged = tempfile::Builder::new()
        .prefix(".extract-")
        .tempfile_in(root)
        .map_err(stage_error)?;
    io::copy(&mut entry, staged.as_file_mut()).map_err(stage_error)?;
    let path = Utf8PathBuf::from_path_buf(staged.path().to_path_buf()).map_err(|path| {
        stage_error(io::Error::other(format!("non-UTF-8 staging path {path:?}")))
    })?;
    Ok((staged, path))
}

/// Copy the `.dbf` and `.shp` members out of `archive` into the cache.
///
/// Both members are staged before either is moved, so a missing member
/// leaves the cache untouched.
fn extract_members(
    archive: &mut NamedTempFile,
    url: &str,
    stem: &str,
    cache: &CacheLayout,
    target: &ShapePaths,
) -> Result<(), FetchError> {
    let root = cache.root();
    archive
        .as_file_mut()
        .seek(SeekFrom::Start(0))
        .map_err(|source| FetchError::WriteArchive {
            path: root.to_path_buf(),
            source,
        })?;
    let mut zip = zip::ZipArchive::new(archive.as_file_mut()).map_err(|source| {
        FetchError::Archive {
            url: url.to_owned(),
            source,
        }
    })?;

    let mut staged = Vec::with_capacity(SHAPE_MEMBER_EXTENSIONS.len());
    for extension in SHAPE_MEMBER_EXTENSIONS {
        let name = format!("{stem}.{extension}");
        let (file, path) = stage_member(&mut zip, url, &name, root)?;
        let destination = if extension == "shp" {
            &target.shp
        } else {
            &target.dbf
        };
        staged.push((file, path, destination));
    }
    for (_file, from, destination) in staged {
        rename_file(&from, destination).map_err(|source| FetchError::Rename {
            from: from.clone(),
            to: destination.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Ensure the shapefile pair behind `url` is present in the cache.
///
/// A warm cache returns immediately without touching `source`. Otherwise the
/// archive is downloaded into a temporary file inside the cache root, only
/// its `.dbf` and `.shp` members are copied out beside it and both are then
/// moved into place. Temporary files are removed on every path.
///
/// # Errors
/// Returns [`FetchError::Download`] once the retry policy is exhausted,
/// [`FetchError::Archive`] or [`FetchError::MissingArchiveMember`] for a
/// malformed archive, and filesystem variants for cache I/O failures.
pub async fn fetch_shape<S: DatasetSource + ?Sized>(
    source: &S,
    cache: &CacheLayout,
    url: &str,
    retry: RetryPolicy,
) -> Result<ShapePaths, FetchError> {
    let stem = cache_stem(url).ok_or_else(|| FetchError::InvalidDatasetUrl {
        url: url.to_owned(),
    })?;
    let paths = cache.shape_paths(stem);
    if is_cached(&paths.shp)? && is_cached(&paths.dbf)? {
        debug!("cache hit for {stem}");
        return Ok(paths);
    }

    prepare_cache(cache)?;
    info!("downloading {url}");
    let mut archive = download_with_retry(source, url, cache.root(), retry).await?;
    extract_members(&mut archive, url, stem, cache, &paths)?;
    Ok(paths)
}

/// Ensure the OSM point extract is present in the cache.
///
/// The query response is written to a temporary file in the cache root and
/// renamed into place, so an interrupted download leaves no extract behind.
///
/// # Errors
/// Returns [`FetchError::Query`] for an unusable endpoint,
/// [`FetchError::Download`] when every attempt fails and
/// [`FetchError::PersistExtract`] when the file cannot be moved into place.
pub async fn fetch_point_features<S: DatasetSource + ?Sized>(
    source: &S,
    cache: &CacheLayout,
    endpoint: &str,
    query: &PointQuery,
    retry: RetryPolicy,
) -> Result<Utf8PathBuf, FetchError> {
    let path = cache.point_extract();
    if is_cached(&path)? {
        debug!("cache hit for {path}");
        return Ok(path);
    }

    prepare_cache(cache)?;
    let url = query.request_url(endpoint)?;
    info!("querying {endpoint} for nodes tagged {}", query.tag);
    let extract = download_with_retry(source, url.as_str(), cache.root(), retry).await?;
    extract
        .persist(&path)
        .map_err(|err| FetchError::PersistExtract {
            path: path.clone(),
            source: err.error,
        })?;
    Ok(path)
}

async fn fetch_dataset<S: DatasetSource + ?Sized>(
    source: &S,
    cache: &CacheLayout,
    options: &FetchOptions,
    dataset: ShapeDataset,
) -> Result<ShapePaths, FetchError> {
    let url = dataset.url(&options.natural_earth_url);
    fetch_shape(source, cache, &url, options.shape_retry).await
}

/// Fill the cache with every dataset, one after another.
///
/// # Errors
/// Propagates the first [`FetchError`].
pub async fn fetch_all<S: DatasetSource + ?Sized>(
    source: &S,
    cache: &CacheLayout,
    options: &FetchOptions,
) -> Result<CacheManifest, FetchError> {
    Ok(CacheManifest {
        land: fetch_dataset(source, cache, options, ShapeDataset::Land).await?,
        minor_islands: fetch_dataset(source, cache, options, ShapeDataset::MinorIslands).await?,
        lakes: fetch_dataset(source, cache, options, ShapeDataset::Lakes).await?,
        lakes_europe: fetch_dataset(source, cache, options, ShapeDataset::LakesEurope).await?,
        urban_areas: fetch_dataset(source, cache, options, ShapeDataset::UrbanAreas).await?,
        mileposts: fetch_point_features(
            source,
            cache,
            &options.overpass_url,
            &options.query,
            options.query_retry,
        )
        .await?,
    })
}
