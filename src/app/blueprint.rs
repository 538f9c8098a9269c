//! Route groups registered under a shared prefix and endpoint namespace.

use crate::app::handler::Handler;

/// A route collected by a blueprint, not yet registered.
#[derive(Debug, Clone)]
pub struct BlueprintRoute {
    pub path: String,
    pub handler: Handler,
    pub methods: Vec<String>,
    pub endpoint: String,
}

/// A named group of routes.
///
/// On registration every path is joined onto `url_prefix` and every endpoint
/// becomes `"{name}.{endpoint}"`.
#[derive(Debug, Clone)]
pub struct Blueprint {
    name: String,
    url_prefix: Option<String>,
    routes: Vec<BlueprintRoute>,
}

impl Blueprint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_prefix: None,
            routes: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, url_prefix: impl Into<String>) -> Self {
        self.url_prefix = Some(url_prefix.into());
        self
    }

    /// Collect a route. An empty `methods` slice means `GET`; `endpoint`
    /// defaults to the handler's name.
    pub fn add_route(
        &mut self,
        path: &str,
        handler: Handler,
        methods: &[&str],
        endpoint: Option<&str>,
    ) -> &mut Self {
        let endpoint = endpoint.unwrap_or(handler.name()).to_string();
        self.routes.push(BlueprintRoute {
            path: path.to_string(),
            handler,
            methods: methods.iter().map(|m| m.to_string()).collect(),
            endpoint,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url_prefix(&self) -> Option<&str> {
        self.url_prefix.as_deref()
    }

    pub fn routes(&self) -> &[BlueprintRoute] {
        &self.routes
    }

    /// Path a route will be registered under.
    pub fn full_path(&self, path: &str) -> String {
        match &self.url_prefix {
            Some(prefix) => format!(
                "{}/{}",
                prefix.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => path.to_string(),
        }
    }

    /// Endpoint a route will be registered under.
    pub fn full_endpoint(&self, endpoint: &str) -> String {
        format!("{}.{}", self.name, endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handler::handler;

    #[test]
    fn test_full_path() {
        let bp = Blueprint::new("blog").with_prefix("/blog/");
        assert_eq!(bp.full_path("/posts"), "/blog/posts");
        assert_eq!(bp.full_path("posts/<int:id>"), "/blog/posts/<int:id>");
        assert_eq!(bp.full_path("/"), "/blog/");

        assert_eq!(bp.url_prefix(), Some("/blog/"));

        let bare = Blueprint::new("api");
        assert_eq!(bare.url_prefix(), None);
        assert_eq!(bare.full_path("/items"), "/items");
    }

    #[test]
    fn test_collects_routes() {
        let mut bp = Blueprint::new("blog");
        bp.add_route("/", handler("index", |_req, _p| async { "index" }), &[], None)
            .add_route(
                "/<str:slug>",
                handler("show", |_req, _p| async { "post" }),
                &["GET", "DELETE"],
                Some("post"),
            );

        let endpoints: Vec<&str> = bp.routes().iter().map(|r| r.endpoint.as_str()).collect();
        assert_eq!(endpoints, vec!["index", "post"]);
        assert_eq!(bp.full_endpoint("post"), "blog.post");
        assert_eq!(bp.routes()[1].methods, vec!["GET", "DELETE"]);
    }
}
