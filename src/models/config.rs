//! Configuration document loaded from external sources and its validation.
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::{PathKind, classify};

/// The only authentication scheme the configuration accepts.
const AUTH_KIND_OAUTHV2: &str = "oauthv2";
/// The only OAuth provider the configuration accepts.
const PROVIDER_GITHUB: &str = "github";

/// Raw configuration document as found on disk.
///
/// Every field is optional so validation can name the exact field that is
/// missing instead of failing at deserialization.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ConfigDocument {
    pub core: Option<CoreDocument>,
    pub auth: Option<AuthDocument>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreDocument {
    pub port: Option<u16>,
    // The config loader lowercases keys coming from file sources.
    #[serde(alias = "docroot")]
    pub doc_root: Option<PathBuf>,
    #[serde(alias = "templatepath")]
    pub template_path: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthDocument {
    pub kind: Option<String>,
    pub providers: Option<Vec<ProviderDocument>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDocument {
    pub name: Option<String>,
    #[serde(alias = "clientidenvvar")]
    pub client_id_env_var: Option<String>,
    #[serde(alias = "clientsecretenvvar")]
    pub client_secret_env_var: Option<String>,
}

/// Validated configuration shared across handlers.
///
/// The auth block is checked during validation but not retained; nothing in
/// the serving path consumes it.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub doc_root: PathBuf,
    pub template_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("core configuration missing in the configuration file")]
    MissingCore,
    #[error("`port` value missing from core configuration")]
    MissingPort,
    #[error("`docRoot` value missing from core configuration")]
    MissingDocRoot,
    #[error("`templatePath` value missing from core configuration")]
    MissingTemplatePath,
    #[error("document root points to non-existent path: '{}'", .0.display())]
    DocRootMissing(PathBuf),
    #[error("document root does not point to a directory: '{}'", .0.display())]
    DocRootNotADirectory(PathBuf),
    #[error("template path points to non-existent path: '{}'", .0.display())]
    TemplateMissing(PathBuf),
    #[error("template path does not point to a regular file or a symlink: '{}'", .0.display())]
    TemplateNotAFile(PathBuf),
    #[error("missing `kind` field for auth configuration")]
    MissingAuthKind,
    #[error("unsupported `kind` value for auth configuration: '{0}'")]
    UnsupportedAuthKind(String),
    #[error("missing `providers` field for auth configuration")]
    MissingProviders,
    #[error("missing `name` field for provider configuration")]
    MissingProviderName,
    #[error("unsupported `name` value for provider configuration: '{0}'")]
    UnsupportedProviderName(String),
    #[error("missing or empty `clientIdEnvVar` field for provider configuration")]
    MissingClientIdEnvVar,
    #[error("missing or empty `clientSecretEnvVar` field for provider configuration")]
    MissingClientSecretEnvVar,
}

/// Validate `document` and produce the server configuration.
///
/// Checks run in a fixed order and stop at the first failure, which is
/// logged unless `silent`.
pub fn validate(document: &ConfigDocument, silent: bool) -> Option<ServerConfig> {
    match check(document) {
        Ok(config) => Some(config),
        Err(err) => {
            if !silent {
                log::error!("{err}");
            }
            None
        }
    }
}

fn check(document: &ConfigDocument) -> Result<ServerConfig, ConfigError> {
    let core = document.core.as_ref().ok_or(ConfigError::MissingCore)?;
    let port = core.port.ok_or(ConfigError::MissingPort)?;
    let doc_root = core.doc_root.clone().ok_or(ConfigError::MissingDocRoot)?;
    let template_path = core
        .template_path
        .clone()
        .ok_or(ConfigError::MissingTemplatePath)?;

    match classify(&doc_root) {
        PathKind::Directory => {}
        PathKind::Missing => return Err(ConfigError::DocRootMissing(doc_root)),
        _ => return Err(ConfigError::DocRootNotADirectory(doc_root)),
    }

    match classify(&template_path) {
        PathKind::File | PathKind::Symlink => {}
        PathKind::Missing => return Err(ConfigError::TemplateMissing(template_path)),
        _ => return Err(ConfigError::TemplateNotAFile(template_path)),
    }

    if let Some(auth) = &document.auth {
        check_auth(auth)?;
    }

    Ok(ServerConfig {
        port,
        doc_root,
        template_path,
    })
}

fn check_auth(auth: &AuthDocument) -> Result<(), ConfigError> {
    let kind = auth.kind.as_deref().ok_or(ConfigError::MissingAuthKind)?;
    if kind != AUTH_KIND_OAUTHV2 {
        return Err(ConfigError::UnsupportedAuthKind(kind.to_string()));
    }

    let providers = auth.providers.as_ref().ok_or(ConfigError::MissingProviders)?;
    for provider in providers {
        let name = provider
            .name
            .as_deref()
            .ok_or(ConfigError::MissingProviderName)?;
        if name != PROVIDER_GITHUB {
            return Err(ConfigError::UnsupportedProviderName(name.to_string()));
        }

        if provider
            .client_id_env_var
            .as_deref()
            .is_none_or(str::is_empty)
        {
            return Err(ConfigError::MissingClientIdEnvVar);
        }
        if provider
            .client_secret_env_var
            .as_deref()
            .is_none_or(str::is_empty)
        {
            return Err(ConfigError::MissingClientSecretEnvVar);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::{TempDir, tempdir};

    use super::*;

    fn site_dir() -> TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("template.html"), "{{ body }}").unwrap();
        dir
    }

    fn core_document(root: &Path) -> ConfigDocument {
        ConfigDocument {
            core: Some(CoreDocument {
                port: Some(808),
                doc_root: Some(root.to_path_buf()),
                template_path: Some(root.join("template.html")),
            }),
            auth: None,
        }
    }

    fn github_provider() -> ProviderDocument {
        ProviderDocument {
            name: Some("github".to_string()),
            client_id_env_var: Some("CLIENT0_ID".to_string()),
            client_secret_env_var: Some("CLIENT0_SECRET".to_string()),
        }
    }

    #[test]
    fn empty_document_is_rejected() {
        assert!(validate(&ConfigDocument::default(), true).is_none());
    }

    #[test]
    fn missing_core_fields_are_rejected() {
        let dir = site_dir();

        let mut document = core_document(dir.path());
        document.core.as_mut().unwrap().port = None;
        assert!(validate(&document, true).is_none());

        let mut document = core_document(dir.path());
        document.core.as_mut().unwrap().doc_root = None;
        assert!(validate(&document, true).is_none());

        let mut document = core_document(dir.path());
        document.core.as_mut().unwrap().template_path = None;
        assert!(validate(&document, true).is_none());
    }

    #[test]
    fn doc_root_must_be_an_existing_directory() {
        let dir = site_dir();

        let mut document = core_document(dir.path());
        document.core.as_mut().unwrap().doc_root = Some(dir.path().join("absent"));
        assert!(validate(&document, true).is_none());

        let mut document = core_document(dir.path());
        document.core.as_mut().unwrap().doc_root = Some(dir.path().join("template.html"));
        assert!(validate(&document, true).is_none());
    }

    #[test]
    fn template_path_must_be_an_existing_file() {
        let dir = site_dir();

        let mut document = core_document(dir.path());
        document.core.as_mut().unwrap().template_path = Some(dir.path().join("absent.html"));
        assert!(validate(&document, true).is_none());

        let mut document = core_document(dir.path());
        document.core.as_mut().unwrap().template_path = Some(dir.path().to_path_buf());
        assert!(validate(&document, true).is_none());
    }

    #[test]
    fn minimal_core_document_is_accepted() {
        let dir = site_dir();
        let config = validate(&core_document(dir.path()), true).unwrap();

        assert_eq!(config.port, 808);
        assert_eq!(config.doc_root, dir.path());
        assert_eq!(config.template_path, dir.path().join("template.html"));
    }

    #[test]
    fn empty_auth_block_is_rejected() {
        let dir = site_dir();
        let mut document = core_document(dir.path());
        document.auth = Some(AuthDocument::default());

        assert!(validate(&document, true).is_none());
    }

    #[test]
    fn unsupported_auth_kind_is_rejected() {
        let dir = site_dir();
        let mut document = core_document(dir.path());
        document.auth = Some(AuthDocument {
            kind: Some("foobar".to_string()),
            providers: Some(vec![github_provider()]),
        });

        assert!(validate(&document, true).is_none());
    }

    #[test]
    fn auth_without_providers_is_rejected() {
        let dir = site_dir();
        let mut document = core_document(dir.path());
        document.auth = Some(AuthDocument {
            kind: Some("oauthv2".to_string()),
            providers: None,
        });

        assert!(validate(&document, true).is_none());
    }

    #[test]
    fn provider_name_must_be_github() {
        let dir = site_dir();

        let mut provider = github_provider();
        provider.name = None;
        let mut document = core_document(dir.path());
        document.auth = Some(AuthDocument {
            kind: Some("oauthv2".to_string()),
            providers: Some(vec![provider]),
        });
        assert!(validate(&document, true).is_none());

        let mut provider = github_provider();
        provider.name = Some("guthub".to_string());
        let mut document = core_document(dir.path());
        document.auth = Some(AuthDocument {
            kind: Some("oauthv2".to_string()),
            providers: Some(vec![provider]),
        });
        assert!(validate(&document, true).is_none());
    }

    #[test]
    fn provider_env_vars_must_be_present_and_non_empty() {
        let dir = site_dir();

        for broken in [
            ProviderDocument {
                client_id_env_var: None,
                ..github_provider()
            },
            ProviderDocument {
                client_id_env_var: Some(String::new()),
                ..github_provider()
            },
            ProviderDocument {
                client_secret_env_var: None,
                ..github_provider()
            },
            ProviderDocument {
                client_secret_env_var: Some(String::new()),
                ..github_provider()
            },
        ] {
            let mut document = core_document(dir.path());
            document.auth = Some(AuthDocument {
                kind: Some("oauthv2".to_string()),
                providers: Some(vec![broken]),
            });
            assert!(validate(&document, true).is_none());
        }
    }

    #[test]
    fn github_auth_document_is_accepted() {
        let dir = site_dir();
        let mut document = core_document(dir.path());
        document.auth = Some(AuthDocument {
            kind: Some("oauthv2".to_string()),
            providers: Some(vec![github_provider(), github_provider()]),
        });

        assert!(validate(&document, true).is_some());
    }
}
