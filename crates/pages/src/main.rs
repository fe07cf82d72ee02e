//! Print an admin page spec as JSON.
//!
//! ```text
//! authadmin-pages <page> [--roles admin,user] [--options '<json>'] [--auth-url <url>]
//! authadmin-pages --schema
//! ```

use anyhow::{Context, Result, bail};

use authadmin_pages::context::AUTH_MODULE;
use authadmin_pages::{OPTION_SCHEMA, PageKind, PageOptions, RequestContext};

fn main() -> Result<()> {
    authadmin_observability::init_pretty();

    let mut args = std::env::args().skip(1);
    let mut page: Option<PageKind> = None;
    let mut ctx = RequestContext::default().with_module_url(
        AUTH_MODULE,
        std::env::var("AUTH_ADMIN_BASE_URL").unwrap_or_else(|_| "/api/auth".to_string()),
    );

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--schema" => {
                println!("{}", serde_json::to_string_pretty(OPTION_SCHEMA)?);
                return Ok(());
            }
            "--roles" => {
                let roles = args.next().context("--roles needs a value")?;
                ctx.user_roles = roles
                    .split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "--options" => {
                let raw = args.next().context("--options needs a JSON object")?;
                let options: PageOptions =
                    serde_json::from_str(&raw).context("--options is not a JSON object")?;
                ctx.options = options;
            }
            "--auth-url" => {
                let url = args.next().context("--auth-url needs a value")?;
                ctx = ctx.with_module_url(AUTH_MODULE, url);
            }
            name => match PageKind::parse(name) {
                Some(kind) => page = Some(kind),
                None => bail!("unknown page or flag '{name}'"),
            },
        }
    }

    let Some(page) = page else {
        let names: Vec<&str> = PageKind::ALL.iter().map(PageKind::as_str).collect();
        bail!("missing page name; expected one of: {}", names.join(", "));
    };

    tracing::info!(page = page.as_str(), roles = ctx.user_roles.len(), "generating page spec");
    let spec = page.generate(&ctx);
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}
