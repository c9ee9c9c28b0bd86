//! Path resolution against the asset root
//!
//! Decision tree, evaluated independently for every request:
//! 1. Extensioned path: serve that exact file or report not-found
//! 2. Extensionless path: serve `<path>.html` (`/` maps to the default page)
//! 3. Otherwise serve the default page with success status

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::path::RequestPath;
use crate::error::ResolveError;
use crate::http::mime;
use crate::logger;

/// What a request path should be resolved to, before touching the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePlan {
    /// Exact file, no fallback
    Asset { file: String },
    /// Named HTML page, falling back to the default page
    Page { candidate: String },
}

/// Compute the lookup plan for a path
pub fn plan(path: &RequestPath, default_page: &str) -> RoutePlan {
    if path.has_extension() {
        return RoutePlan::Asset {
            file: path.relative().to_string(),
        };
    }

    let candidate = if path.is_root() {
        default_page.to_string()
    } else {
        format!("{}.html", path.relative())
    };
    RoutePlan::Page { candidate }
}

/// A file read from the asset root
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub content: Vec<u8>,
    pub content_type: &'static str,
}

/// Exactly one outcome per request
#[derive(Debug)]
pub enum Resolution {
    /// Extensioned path matched a file
    Asset(LoadedFile),
    /// Extensionless path matched `<name>.html` (or `/` matched the default page)
    Page(LoadedFile),
    /// Extensionless path with no named page; default page served instead
    Fallback { requested: String, page: LoadedFile },
    NotFound(ResolveError),
}

impl Resolution {
    pub const fn status(&self) -> u16 {
        match self {
            Self::Asset(_) | Self::Page(_) | Self::Fallback { .. } => 200,
            Self::NotFound(_) => 404,
        }
    }

    pub const fn file(&self) -> Option<&LoadedFile> {
        match self {
            Self::Asset(file) | Self::Page(file) | Self::Fallback { page: file, .. } => Some(file),
            Self::NotFound(_) => None,
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Asset(_) => "asset",
            Self::Page(_) => "page",
            Self::Fallback { .. } => "fallback",
            Self::NotFound(_) => "not-found",
        }
    }
}

/// Stateless resolver over an immutable asset root
#[derive(Debug, Clone)]
pub struct ContentRouter {
    root: PathBuf,
    default_page: String,
}

impl ContentRouter {
    /// Create a router; the root must exist so it can be canonicalized once
    pub fn new(root: impl AsRef<Path>, default_page: &str) -> io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        Ok(Self {
            root,
            default_page: default_page.trim_start_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn default_page(&self) -> &str {
        &self.default_page
    }

    /// Resolve a request path to exactly one outcome
    pub async fn resolve(&self, path: &RequestPath) -> Resolution {
        match plan(path, &self.default_page) {
            // Undecodable escapes name no file
            RoutePlan::Asset { file } if !path.is_decoded() => {
                Resolution::NotFound(ResolveError::AssetNotFound(file))
            }
            RoutePlan::Page { .. } if !path.is_decoded() => self.fallback(path).await,
            RoutePlan::Asset { file } => match self.load(&file).await {
                Ok(loaded) => Resolution::Asset(loaded),
                Err(err) => Resolution::NotFound(err),
            },
            RoutePlan::Page { candidate } => match self.load(&candidate).await {
                Ok(loaded) => Resolution::Page(loaded),
                Err(_) => {
                    logger::log_debug(&format!(
                        "{}, serving {}",
                        ResolveError::PageNotFound(candidate),
                        self.default_page
                    ));
                    self.fallback(path).await
                }
            },
        }
    }

    async fn fallback(&self, path: &RequestPath) -> Resolution {
        match self.load(&self.default_page).await {
            Ok(page) => Resolution::Fallback {
                requested: path.to_string(),
                page,
            },
            Err(err) => {
                logger::log_error(&format!("Fallback for {path} failed: {err}"));
                Resolution::NotFound(ResolveError::DefaultPageMissing(
                    self.root.join(&self.default_page),
                ))
            }
        }
    }

    /// Read a regular file under the root; anything else counts as absent
    async fn load(&self, relative: &str) -> Result<LoadedFile, ResolveError> {
        let joined = self.root.join(relative);

        // Missing files are the common case (404 or fallback), not worth a log line
        let Ok(canonical) = fs::canonicalize(&joined).await else {
            return Err(ResolveError::AssetNotFound(relative.to_string()));
        };
        if !canonical.starts_with(&self.root) {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {} -> {}",
                relative,
                canonical.display()
            ));
            return Err(ResolveError::OutsideRoot(relative.to_string()));
        }

        match fs::metadata(&canonical).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(ResolveError::AssetNotFound(relative.to_string())),
        }

        let content = match fs::read(&canonical).await {
            Ok(c) => c,
            Err(source) => {
                logger::log_error(&format!(
                    "Failed to read file '{}': {}",
                    canonical.display(),
                    source
                ));
                return Err(ResolveError::Io {
                    path: canonical,
                    source,
                });
            }
        };
        let content_type = mime::content_type_for_path(&canonical);

        Ok(LoadedFile {
            path: canonical,
            content,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;

    const INDEX: &str = "<h1>Home</h1>";
    const ABOUT: &str = "<h1>About</h1>";

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        stdfs::write(root.join("index.html"), INDEX).unwrap();
        stdfs::write(root.join("about.html"), ABOUT).unwrap();
        stdfs::create_dir_all(root.join("css")).unwrap();
        stdfs::write(root.join("css/style.css"), "body{}").unwrap();
        stdfs::create_dir_all(root.join("js")).unwrap();
        stdfs::write(root.join("js/main.js"), "console.log(1)").unwrap();
        stdfs::create_dir_all(root.join("images")).unwrap();
        stdfs::write(root.join("images/hero.png"), [0x89, b'P', b'N', b'G']).unwrap();
        stdfs::create_dir_all(root.join("projects")).unwrap();
        stdfs::write(root.join("projects/index.html"), "<h1>Projects dir</h1>").unwrap();
        dir
    }

    fn router(dir: &tempfile::TempDir) -> ContentRouter {
        ContentRouter::new(dir.path(), "index.html").unwrap()
    }

    async fn resolve(router: &ContentRouter, raw: &str) -> Resolution {
        router.resolve(&RequestPath::new(raw)).await
    }

    #[test]
    fn test_plan() {
        let p = |raw: &str| plan(&RequestPath::new(raw), "index.html");
        assert_eq!(
            p("/css/style.css"),
            RoutePlan::Asset {
                file: "css/style.css".to_string()
            }
        );
        assert_eq!(
            p("/"),
            RoutePlan::Page {
                candidate: "index.html".to_string()
            }
        );
        assert_eq!(
            p("/about"),
            RoutePlan::Page {
                candidate: "about.html".to_string()
            }
        );
        assert_eq!(
            p("/services/roofing"),
            RoutePlan::Page {
                candidate: "services/roofing.html".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_extensioned_asset_served_with_type() {
        let dir = site();
        let router = router(&dir);

        let res = resolve(&router, "/css/style.css").await;
        assert_eq!(res.status(), 200);
        let file = res.file().unwrap();
        assert_eq!(file.content, b"body{}");
        assert_eq!(file.content_type, "text/css");

        let res = resolve(&router, "/js/main.js").await;
        assert_eq!(res.file().unwrap().content_type, "application/javascript");

        let res = resolve(&router, "/images/hero.png").await;
        assert!(matches!(res, Resolution::Asset(_)));
        assert_eq!(res.file().unwrap().content_type, "image/png");
    }

    #[tokio::test]
    async fn test_missing_extensioned_asset_is_404() {
        let dir = site();
        let router = router(&dir);

        let res = resolve(&router, "/css/missing.css").await;
        assert_eq!(res.status(), 404);
        assert!(matches!(res, Resolution::NotFound(ResolveError::AssetNotFound(_))));

        // No fallback even for an html extension
        let res = resolve(&router, "/contact.html").await;
        assert_eq!(res.status(), 404);
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let dir = site();
        let res = resolve(&router(&dir), "/").await;
        assert!(matches!(res, Resolution::Page(_)));
        assert_eq!(res.file().unwrap().content, INDEX.as_bytes());
        assert_eq!(res.file().unwrap().content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn test_named_page() {
        let dir = site();
        let res = resolve(&router(&dir), "/about").await;
        assert!(matches!(res, Resolution::Page(_)));
        assert_eq!(res.file().unwrap().content, ABOUT.as_bytes());
    }

    #[tokio::test]
    async fn test_unknown_page_falls_back_with_200() {
        let dir = site();
        let res = resolve(&router(&dir), "/careers").await;
        assert_eq!(res.status(), 200);
        match res {
            Resolution::Fallback { requested, page } => {
                assert_eq!(requested, "/careers");
                assert_eq!(page.content, INDEX.as_bytes());
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_directory_name_is_not_a_page() {
        let dir = site();
        // projects/ exists but projects.html does not
        let res = resolve(&router(&dir), "/projects").await;
        assert!(matches!(res, Resolution::Fallback { .. }));
        assert_eq!(res.file().unwrap().content, INDEX.as_bytes());
    }

    #[tokio::test]
    async fn test_extensioned_directory_is_not_served() {
        let dir = site();
        stdfs::create_dir_all(dir.path().join("v1.2")).unwrap();
        let res = resolve(&router(&dir), "/v1.2").await;
        assert_eq!(res.status(), 404);
    }

    #[tokio::test]
    async fn test_traversal_is_blocked() {
        let outer = tempfile::tempdir().unwrap();
        let root = outer.path().join("public");
        stdfs::create_dir_all(&root).unwrap();
        stdfs::write(root.join("index.html"), INDEX).unwrap();
        stdfs::write(outer.path().join("secret.txt"), "secret").unwrap();
        stdfs::write(outer.path().join("secret.html"), "secret").unwrap();
        let router = ContentRouter::new(&root, "index.html").unwrap();

        let res = resolve(&router, "/../secret.txt").await;
        assert!(matches!(res, Resolution::NotFound(ResolveError::OutsideRoot(_))));

        // Extensionless traversal degrades to the default page
        let res = resolve(&router, "/../secret").await;
        assert!(matches!(res, Resolution::Fallback { .. }));
        assert_eq!(res.file().unwrap().content, INDEX.as_bytes());
    }

    #[tokio::test]
    async fn test_percent_encoded_names() {
        let dir = site();
        stdfs::write(dir.path().join("our team.png"), [0x89, b'P', b'N', b'G']).unwrap();
        stdfs::write(dir.path().join("about us.html"), "<h1>About us</h1>").unwrap();
        let router = router(&dir);

        let res = resolve(&router, "/our%20team.png").await;
        assert!(matches!(res, Resolution::Asset(_)));
        assert_eq!(res.file().unwrap().content_type, "image/png");

        let res = resolve(&router, "/about%20us").await;
        assert!(matches!(res, Resolution::Page(_)));
        assert_eq!(res.file().unwrap().content, b"<h1>About us</h1>");
    }

    #[tokio::test]
    async fn test_encoded_traversal_is_blocked() {
        let outer = tempfile::tempdir().unwrap();
        let root = outer.path().join("public");
        stdfs::create_dir_all(&root).unwrap();
        stdfs::write(root.join("index.html"), INDEX).unwrap();
        stdfs::write(outer.path().join("secret.txt"), "secret").unwrap();
        let router = ContentRouter::new(&root, "index.html").unwrap();

        let res = resolve(&router, "/%2e%2e/secret.txt").await;
        assert!(matches!(res, Resolution::NotFound(ResolveError::OutsideRoot(_))));
        let res = resolve(&router, "/%2E%2E%2Fsecret.txt").await;
        assert_eq!(res.status(), 404);
    }

    #[tokio::test]
    async fn test_undecodable_path_is_absent() {
        let dir = site();
        stdfs::write(dir.path().join("%FF.css"), "body{}").unwrap();
        let router = router(&dir);

        let res = resolve(&router, "/%FF.css").await;
        assert!(matches!(res, Resolution::NotFound(ResolveError::AssetNotFound(_))));
        let res = resolve(&router, "/%FF").await;
        assert!(matches!(res, Resolution::Fallback { .. }));
        assert_eq!(res.file().unwrap().content, INDEX.as_bytes());
    }

    #[tokio::test]
    async fn test_missing_default_page_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let router = ContentRouter::new(dir.path(), "index.html").unwrap();
        let res = resolve(&router, "/anything").await;
        assert_eq!(res.status(), 404);
        assert!(matches!(
            res,
            Resolution::NotFound(ResolveError::DefaultPageMissing(_))
        ));
    }

    #[test]
    fn test_missing_root_is_error() {
        assert!(ContentRouter::new("/definitely/not/here", "index.html").is_err());
    }
}
