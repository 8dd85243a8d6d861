//! Cluster a day's deliveries, then sequence each cluster from the depot.

use waypoint::{
    find_optimal_k, format_distance, retain_located, sequence_route, Coordinate, GeoKmeans, Point,
};

fn main() {
    let depot = Coordinate::new(14.5995, 120.9842);

    let deliveries = vec![
        // North
        Point::new("ord-101", 14.6760, 121.0437).with_label("Quezon Ave"),
        Point::new("ord-102", 14.6800, 121.0500).with_priority(2),
        Point::new("ord-103", 14.6700, 121.0300),
        // South
        Point::new("ord-201", 14.5176, 121.0509).with_label("BGC"),
        Point::new("ord-202", 14.5200, 121.0450),
        Point::new("ord-203", 14.5100, 121.0600).with_priority(1),
        // West
        Point::new("ord-301", 14.5547, 120.9900),
        Point::new("ord-302", 14.5600, 120.9850),
        // Missing location
        Point::new("ord-999", 0.0, 0.0),
    ];

    let deliveries = retain_located(deliveries);

    // --- Single driver ---
    let route = sequence_route(&deliveries, depot);
    println!(
        "=== Single route ({} stops, {}) ===",
        route.len(),
        format_distance(route.total_distance_km)
    );
    for (i, stop) in route.stops.iter().enumerate() {
        println!("  {:2}. {} (priority {})", i + 1, stop.id, stop.priority);
    }

    // --- Split across drivers ---
    let k = find_optimal_k(&deliveries, 5);
    let result = match GeoKmeans::new(k).with_seed(42).fit(&deliveries) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("clustering failed: {e}");
            return;
        }
    };

    println!(
        "\n=== {} clusters after {} iterations (distortion {:.2} km) ===",
        result.k(),
        result.iterations,
        result.total_distortion_km
    );
    for (cluster, route) in result.clusters.iter().zip(result.routes(depot)) {
        println!(
            "  cluster {} @ ({:.4}, {:.4}): {} [{}]",
            cluster.index,
            cluster.center.latitude,
            cluster.center.longitude,
            route.ids().join(" -> "),
            format_distance(route.total_distance_km)
        );
    }
}
