use anyhow::Context;
use serde::Serialize;
use taskflow_access::{AccessDecision, SessionUser};
use taskflow_navigation::{AppRoutes, Location, RouteGuard};

#[derive(Serialize)]
struct Report<'a> {
    location: String,
    title: Option<&'a str>,
    decision: AccessDecision,
    redirect: Option<String>,
}

fn main() -> anyhow::Result<()> {
    taskflow_observability::init();

    let mut authenticated = false;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--authenticated" => authenticated = true,
            _ => paths.push(arg),
        }
    }

    if paths.is_empty() {
        anyhow::bail!("usage: taskflow-routecheck [--authenticated] <path>...");
    }

    let guard = match std::env::var("TASKFLOW_ROUTES") {
        Ok(file) => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read route table {file}"))?;
            RouteGuard::from_json_or_empty(&json)
        }
        Err(_) => {
            tracing::info!("TASKFLOW_ROUTES not set; using built-in route table");
            RouteGuard::builtin()
        }
    };
    let routes = AppRoutes::builtin(guard.table());

    let user = authenticated.then(|| SessionUser::new(serde_json::json!({ "source": "routecheck" })));

    for path in paths {
        let location = Location::parse(&path);
        let outcome = guard.evaluate(&location, user.as_ref());
        let report = Report {
            location: location.to_string(),
            title: routes.find(location.pathname()).map(|r| r.title),
            decision: outcome.decision,
            redirect: outcome.redirect,
        };
        println!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}
