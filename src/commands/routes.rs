//! Route table handler; works without a backend.

use account_desk_core::Router;

/// One line per navigable path: the link, then the views it activates.
#[must_use]
pub fn route_table_lines(router: &Router) -> Vec<String> {
    router
        .paths()
        .map(|(path, views)| {
            let chain = views
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" > ");
            format!("{:<24} {chain}", Router::href(path))
        })
        .collect()
}

pub fn run_routes_command(router: &Router) {
    for line in route_table_lines(router) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table_lists_default_routes() {
        let lines = route_table_lines(&Router::with_default_routes());

        assert!(lines.iter().any(|line| line.starts_with("#/ ") && line.ends_with("Home")));
        assert!(
            lines
                .iter()
                .any(|line| line.starts_with("#/login") && line.ends_with("Login"))
        );
        assert!(lines.iter().any(|line| line.ends_with("Home > ClientAccounts")));
        assert!(
            lines
                .iter()
                .any(|line| line.ends_with("Home > ClientPrivateMessage"))
        );
    }

    #[test]
    fn test_route_table_has_one_line_per_path() {
        let router = Router::with_default_routes();
        let lines = route_table_lines(&router);

        assert_eq!(lines.len(), router.paths().count());
        assert!(lines.iter().all(|line| !line.contains('\n')));
    }
}
