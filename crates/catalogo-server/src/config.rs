use catalogo_core::{validate_route_table, CatalogError, DatasetDescriptor, Result};
use std::{
    env,
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{info, warn};

pub const DEFAULT_ORIGINS: [&str; 2] = [
    "http://localhost:5173",
    "https://lucent-piroshki-c15011.netlify.app",
];

#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    /// Resolved path of the document served at `/`.
    pub index_file: PathBuf,
    /// Route table with source locations resolved against `data_dir`.
    pub datasets: Vec<DatasetDescriptor>,
    pub store_dir: Option<PathBuf>,
    pub cors_origins: Vec<String>,
    pub tls: Option<TlsPaths>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = try_load(&var, "PORT", "3000")?;
        let data_dir: PathBuf = try_load(&var, "DATA_DIR", "data")?;
        let index_file = data_dir.join(try_load::<PathBuf>(&var, "INDEX_FILE", "inicio.json")?);

        let table = match var("DATASETS_FILE") {
            Some(path) => load_route_table(Path::new(&path))?,
            None => default_route_table(),
        };
        let datasets = resolve(table, &data_dir);
        validate_route_table(&datasets)?;

        let cors_origins = match var("CORS_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        let tls = match (var("TLS_CERT_PATH"), var("TLS_KEY_PATH")) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => {
                warn!("TLS_CERT_PATH and TLS_KEY_PATH must be set together, serving plain http");
                None
            }
        };

        Ok(Self {
            port,
            data_dir,
            index_file,
            datasets,
            store_dir: var("STORE_DIR").map(PathBuf::from),
            cors_origins,
            tls,
        })
    }
}

fn try_load<T: FromStr>(var: impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        CatalogError::Config(format!("invalid {key}: {e}"))
    })
}

/// Datasets served when no `DATASETS_FILE` is given.
pub fn default_route_table() -> Vec<DatasetDescriptor> {
    [
        ("/cursos", "cursos_programas_100.csv", ';'),
        ("/programas", "programas_2024.csv", ';'),
        ("/demanda", "demanda_laboral.csv", ','),
        ("/lenguajes", "preferencias_lenguajes.csv", ','),
    ]
    .into_iter()
    .map(|(prefix, file, separator)| DatasetDescriptor {
        url_prefix: prefix.to_string(),
        source_location: file.into(),
        field_separator: separator,
    })
    .collect()
}

pub fn load_route_table(path: &Path) -> Result<Vec<DatasetDescriptor>> {
    let bytes = std::fs::read(path).map_err(|e| CatalogError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| CatalogError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn resolve(table: Vec<DatasetDescriptor>, data_dir: &Path) -> Vec<DatasetDescriptor> {
    table
        .into_iter()
        .map(|mut d| {
            if d.source_location.is_relative() {
                d.source_location = data_dir.join(&d.source_location);
            }
            d
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults() {
        let c = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(c.port, 3000);
        assert_eq!(c.index_file, PathBuf::from("data/inicio.json"));
        assert_eq!(c.datasets.len(), 4);
        assert_eq!(
            c.datasets[0].source_location,
            PathBuf::from("data/cursos_programas_100.csv")
        );
        assert_eq!(c.cors_origins.len(), 2);
        assert!(c.store_dir.is_none());
        assert!(c.tls.is_none());
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(Config::from_lookup(lookup(&[("PORT", "http")])).is_err());
    }

    #[test]
    fn origins_and_store_from_env() {
        let c = Config::from_lookup(lookup(&[
            ("CORS_ORIGINS", "https://a.example, ,https://b.example"),
            ("STORE_DIR", "/var/lib/catalogo"),
            ("TLS_CERT_PATH", "cert.pem"),
        ]))
        .unwrap();
        assert_eq!(c.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(c.store_dir, Some(PathBuf::from("/var/lib/catalogo")));
        assert!(c.tls.is_none());
    }

    #[test]
    fn route_table_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("datasets.json");
        std::fs::write(
            &table,
            r#"[{"prefix":"/encuesta","file":"/abs/encuesta.csv","separator":"|"},
                {"prefix":"/otra","file":"otra.csv"}]"#,
        )
        .unwrap();
        let c = Config::from_lookup(lookup(&[
            ("DATASETS_FILE", table.to_str().unwrap()),
            ("DATA_DIR", "/srv"),
        ]))
        .unwrap();
        assert_eq!(c.datasets.len(), 2);
        assert_eq!(c.datasets[0].source_location, PathBuf::from("/abs/encuesta.csv"));
        assert_eq!(c.datasets[0].field_separator, '|');
        assert_eq!(c.datasets[1].source_location, PathBuf::from("/srv/otra.csv"));
    }

    #[test]
    fn duplicate_prefix_in_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("datasets.json");
        std::fs::write(
            &table,
            r#"[{"prefix":"/a","file":"a.csv"},{"prefix":"/a","file":"b.csv"}]"#,
        )
        .unwrap();
        let err = Config::from_lookup(lookup(&[("DATASETS_FILE", table.to_str().unwrap())]));
        assert!(matches!(err, Err(CatalogError::Config(_))));
    }
}
