use anyhow::Context;
use staymap::{
    data::listing::listings_from_json,
    traits::FixedLocation,
    LatLng, Listing, MapSearchEvent, MapSearchOptions, MapSearchSession,
};
use std::sync::Arc;
use std::time::Duration;

const USAGE: &str = "usage: staymap-app [LISTINGS.json] [OPTIONS.json]";

/// Replays a scripted map-search session and prints the markers after each step
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let listings_path = args.next();
    if listings_path.as_deref() == Some("--help") {
        println!("{USAGE}");
        return Ok(());
    }

    let options = match args.next() {
        Some(path) => MapSearchOptions::from_json_file(&path)
            .with_context(|| format!("loading options from {path}"))?,
        None => MapSearchOptions::default(),
    };

    let listings = match listings_path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading listings from {path}"))?;
            listings_from_json(&raw).with_context(|| format!("parsing listings in {path}"))?
        }
        None => sample_listings(),
    };

    let mut session = MapSearchSession::new(options);
    let dropped = session.set_listings(listings);
    if dropped > 0 {
        log::warn!("{} listings dropped during validation", dropped);
    }
    report("initial view", &session)?;

    session.zoom_out();
    session.zoom_out();
    report("zoomed out twice", &session)?;

    if let Some(id) = session
        .markers()
        .clusters()
        .iter()
        .max_by_key(|cluster| cluster.count)
        .map(|cluster| cluster.id.clone())
    {
        session.focus_cluster(&id);
        report(&format!("clicked cluster {id}"), &session)?;
    }

    session.handle_event(&MapSearchEvent::ZoomIn);
    session.handle_event(&MapSearchEvent::ZoomIn);
    report("zoomed in twice", &session)?;

    if let Some(place) = session.search_location("juhu") {
        report(&format!("searched for {}", place.name), &session)?;
    }

    session.request_location(Arc::new(FixedLocation(Ok(LatLng::new(19.1075, 72.8263)))));
    for _ in 0..100 {
        if session.poll_location().is_some() {
            report("used my location", &session)?;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    Ok(())
}

fn report(step: &str, session: &MapSearchSession) -> anyhow::Result<()> {
    let viewport = session.viewport();
    println!(
        "== {step}: center ({:.4}, {:.4}) zoom {} ({})",
        viewport.latitude(),
        viewport.longitude(),
        viewport.zoom(),
        if session.is_clustered() { "clusters" } else { "listings" }
    );
    for marker in session.visible_markers() {
        println!("   {}", serde_json::to_string(&marker)?);
    }
    Ok(())
}

fn sample_listings() -> Vec<Listing> {
    vec![
        Listing::new("bandra-sea-view", 19.0596, 72.8295, 5500.0),
        Listing::new("andheri-studio", 19.1136, 72.8697, 3200.0),
        Listing::new("powai-lakeside", 19.1197, 72.9059, 4800.0),
        Listing::new("andheri-east-2bhk", 19.1130, 72.8690, 4000.0),
        Listing::new("juhu-beach-villa", 19.1075, 72.8263, 12000.0),
        Listing::new("colaba-heritage", 18.9067, 72.8147, 7600.0),
        Listing::new("worli-loft", 19.0176, 72.8162, 6900.0),
    ]
}
