use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info, warn};

use podcastr::format::parse_locale;
use podcastr::page::{EPISODE_REVALIDATE, HOME_REVALIDATE};
use podcastr::{ApiClient, Layout, ReqwestClient, Site, SiteConfig, routes};

/// Serve podcast episode pages generated from a JSON episode API
#[derive(Parser, Debug)]
#[command(name = "podcastr")]
#[command(about = "Serve podcast episode pages generated from a JSON episode API")]
#[command(version)]
struct Args {
    /// Base URL of the episode API
    #[arg(long, default_value = "http://localhost:3333/")]
    api_url: String,

    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1")]
    address: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Locale for published dates, e.g. pt_BR or en_US
    #[arg(long, default_value = "pt_BR")]
    locale: String,

    /// URL of the script providing the page's `player`
    #[arg(long)]
    player_script: Option<String>,

    /// Seconds before the home page is regenerated
    #[arg(long, default_value_t = HOME_REVALIDATE.as_secs())]
    home_revalidate: u64,

    /// Seconds before an episode page is regenerated
    #[arg(long, default_value_t = EPISODE_REVALIDATE.as_secs())]
    episode_revalidate: u64,

    /// Skip generating pages at startup; everything is generated on first request
    #[arg(long)]
    no_prerender: bool,
}

impl Args {
    fn addr(&self) -> SocketAddr {
        (self.address, self.port).into()
    }

    fn site_config(&self) -> Result<SiteConfig> {
        Ok(SiteConfig {
            locale: parse_locale(&self.locale)?,
            layout: Layout {
                player_script: self.player_script.clone(),
            },
            home_revalidate: Duration::from_secs(self.home_revalidate),
            episode_revalidate: Duration::from_secs(self.episode_revalidate),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = args.site_config().context("Invalid configuration")?;

    let api = ApiClient::new(ReqwestClient::new(), &args.api_url)
        .with_context(|| format!("Invalid API URL {}", args.api_url))?;
    info!("using episode API at {}", api.base_url());

    let site = Arc::new(Site::new(api, config));

    if args.no_prerender {
        warn!("pre-rendering disabled, pages are generated on first request");
    } else {
        site.prerender()
            .await
            .context("Failed to pre-render pages")?;
    }

    let addr = args.addr();
    info!("listening on http://{addr}");
    warp::serve(routes(site)).run(addr).await;

    Ok(())
}
