//! Resource routers.
//!
//! A router keeps a registry of `(prefix, basename, viewset)` entries and turns
//! it into axum routes: `/{prefix}/` for the collection and `/{prefix}/:pk/`
//! for a single record. `DefaultRouter` additionally serves an API root that
//! lists every registered prefix. Registries are plain vectors, so one router
//! can absorb another's registrations with `registry.extend(...)`.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    routing::{get, MethodRouter},
    Json, Router,
};
use serde::Serialize;

/// Handlers for one resource: the collection route and the detail route.
#[derive(Clone)]
pub struct ViewSet<S> {
    pub list: MethodRouter<S>,
    pub detail: MethodRouter<S>,
}

impl<S> ViewSet<S> {
    pub fn new(list: MethodRouter<S>, detail: MethodRouter<S>) -> Self {
        ViewSet { list, detail }
    }
}

#[derive(Clone)]
pub struct Registration<S> {
    pub prefix: String,
    pub basename: String,
    pub viewset: ViewSet<S>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub path: String,
    pub name: String,
}

#[derive(Clone)]
pub struct SimpleRouter<S> {
    pub registry: Vec<Registration<S>>,
}

impl<S> Default for SimpleRouter<S> {
    fn default() -> Self {
        SimpleRouter { registry: Vec::new() }
    }
}

impl<S> SimpleRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, prefix: &str, viewset: ViewSet<S>, basename: &str) -> &mut Self {
        register(&mut self.registry, prefix, viewset, basename);
        self
    }

    pub fn routes(&self, mount: &str) -> Vec<RouteInfo> {
        registry_routes(&self.registry, mount)
    }

    pub fn urls(&self, mount: &str) -> Router<S> {
        registry_urls(&self.registry, mount)
    }
}

/// A [`SimpleRouter`] plus an API root view at the mount point.
#[derive(Clone)]
pub struct DefaultRouter<S> {
    pub registry: Vec<Registration<S>>,
    root: Option<MethodRouter<S>>,
}

impl<S> Default for DefaultRouter<S> {
    fn default() -> Self {
        DefaultRouter {
            registry: Vec::new(),
            root: None,
        }
    }
}

impl<S> DefaultRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub const ROOT_NAME: &'static str = "api-root";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, prefix: &str, viewset: ViewSet<S>, basename: &str) -> &mut Self {
        register(&mut self.registry, prefix, viewset, basename);
        self
    }

    /// Extra methods served on the root path next to the listing `GET`.
    /// The given router must not handle `GET` itself.
    pub fn root_methods(&mut self, methods: MethodRouter<S>) -> &mut Self {
        self.root = Some(methods);
        self
    }

    /// Maps each registered prefix to its collection URL.
    pub fn root_listing(&self, mount: &str) -> BTreeMap<String, String> {
        self.registry
            .iter()
            .map(|entry| (entry.prefix.clone(), join(mount, &format!("{}/", entry.prefix))))
            .collect()
    }

    pub fn routes(&self, mount: &str) -> Vec<RouteInfo> {
        let mut routes = vec![RouteInfo {
            path: join(mount, ""),
            name: Self::ROOT_NAME.to_string(),
        }];
        routes.extend(registry_routes(&self.registry, mount));
        routes
    }

    pub fn urls(&self, mount: &str) -> Router<S> {
        let listing = Arc::new(self.root_listing(mount));
        let root_view = move || {
            let listing = Arc::clone(&listing);
            async move { Json(listing.as_ref().clone()) }
        };

        let root = match self.root.clone() {
            Some(methods) => methods.get(root_view),
            None => get(root_view),
        };

        registry_urls(&self.registry, mount).route(&join(mount, ""), root)
    }
}

fn register<S>(registry: &mut Vec<Registration<S>>, prefix: &str, viewset: ViewSet<S>, basename: &str) {
    registry.push(Registration {
        prefix: prefix.trim_matches('/').to_string(),
        basename: basename.to_string(),
        viewset,
    });
}

fn registry_routes<S>(registry: &[Registration<S>], mount: &str) -> Vec<RouteInfo> {
    registry
        .iter()
        .flat_map(|entry| {
            [
                RouteInfo {
                    path: list_path(mount, &entry.prefix),
                    name: format!("{}-list", entry.basename),
                },
                RouteInfo {
                    path: detail_path(mount, &entry.prefix),
                    name: format!("{}-detail", entry.basename),
                },
            ]
        })
        .collect()
}

fn registry_urls<S>(registry: &[Registration<S>], mount: &str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    registry.iter().fold(Router::new(), |router, entry| {
        router
            .route(&list_path(mount, &entry.prefix), entry.viewset.list.clone())
            .route(&detail_path(mount, &entry.prefix), entry.viewset.detail.clone())
    })
}

fn list_path(mount: &str, prefix: &str) -> String {
    join(mount, &format!("{}/", prefix))
}

fn detail_path(mount: &str, prefix: &str) -> String {
    join(mount, &format!("{}/:pk/", prefix))
}

fn join(mount: &str, suffix: &str) -> String {
    format!("{}/{}", mount.trim_end_matches('/'), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::post,
    };
    use tower::ServiceExt;

    fn echo_viewset(name: &'static str) -> ViewSet<()> {
        ViewSet::new(
            get(move || async move { format!("{} list", name) }),
            get(move || async move { format!("{} detail", name) }),
        )
    }

    async fn fetch(router: Router, method: &str, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_simple_router_route_table() {
        let mut router = SimpleRouter::new();
        router.register("person", echo_viewset("person"), "person");

        assert_eq!(
            router.routes("/api"),
            vec![
                RouteInfo {
                    path: "/api/person/".to_string(),
                    name: "person-list".to_string()
                },
                RouteInfo {
                    path: "/api/person/:pk/".to_string(),
                    name: "person-detail".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_register_strips_slashes() {
        let mut router = SimpleRouter::new();
        router.register("/polls/", echo_viewset("polls"), "poll");
        assert_eq!(router.registry[0].prefix, "polls");
        assert_eq!(router.routes("")[0].path, "/polls/");
    }

    #[test]
    fn test_default_router_extends_registry() {
        let mut person_router = SimpleRouter::new();
        person_router.register("person", echo_viewset("person"), "person");

        let mut router = DefaultRouter::new();
        router.register("polls", echo_viewset("polls"), "poll");
        router.registry.extend(person_router.registry);

        let names: Vec<String> = router.routes("/api").into_iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["api-root", "poll-list", "poll-detail", "person-list", "person-detail"]
        );
    }

    #[test]
    fn test_root_listing() {
        let mut router = DefaultRouter::new();
        router.register("person", echo_viewset("person"), "person");

        let listing = router.root_listing("/api");
        assert_eq!(listing.get("person").map(String::as_str), Some("/api/person/"));
    }

    #[tokio::test]
    async fn test_urls_dispatch_list_and_detail() {
        let mut router = SimpleRouter::new();
        router.register("person", echo_viewset("person"), "person");
        let app = router.urls("/api");

        assert_eq!(
            fetch(app.clone(), "GET", "/api/person/").await,
            (StatusCode::OK, "person list".to_string())
        );
        assert_eq!(
            fetch(app.clone(), "GET", "/api/person/5/").await,
            (StatusCode::OK, "person detail".to_string())
        );
        assert_eq!(fetch(app, "GET", "/api/people/").await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_default_router_serves_root() {
        let mut router = DefaultRouter::new();
        router.register("person", echo_viewset("person"), "person");
        router.root_methods(post(|| async { "created" }));
        let app = router.urls("/api");

        let (status, body) = fetch(app.clone(), "GET", "/api/").await;
        assert_eq!(status, StatusCode::OK);
        let listing: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(listing["person"], "/api/person/");

        assert_eq!(
            fetch(app.clone(), "POST", "/api/").await,
            (StatusCode::OK, "created".to_string())
        );
        assert_eq!(fetch(app, "DELETE", "/api/").await.0, StatusCode::METHOD_NOT_ALLOWED);
    }
}
