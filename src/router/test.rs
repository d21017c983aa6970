use crate::config::{ConfigError, MappingConfig, TravelCostType};
use crate::id::{LineId, LinkId, NodeId, RouteId, ShapeId};
use crate::network::Network;
use crate::router::{ModeScheduleRouters, RouterError, ScheduleRouters, ShapeScheduleRouters};
use crate::schedule::{
    LinkCandidate, StopFacility, TransitLine, TransitRoute, TransitRouteStop, TransitSchedule,
};
use crate::test::{add_straight_link, bus_config, bus_schedule, chain_network, chain_shape, BUS};
use crate::Error;

use approx::assert_relative_eq;
use geo::Point;
use std::sync::Arc;

const LINE: &str = "line";

fn ids(route: &str) -> (LineId, RouteId) {
    (LineId::from(LINE), RouteId::from(route))
}

fn link_ids(path: &crate::route::Path) -> Vec<&str> {
    path.links.iter().map(|link| link.id.as_str()).collect()
}

fn loaded_shape_routers(
    network: Network,
    routes: &[(&str, Option<&str>)],
) -> ShapeScheduleRouters {
    let mut routers = ShapeScheduleRouters::new(
        bus_config(),
        Arc::new(bus_schedule(LINE, routes)),
        Arc::new(network),
        [chain_shape("shape")],
    )
    .expect("valid configuration");

    routers.load().expect("first load");
    routers
}

#[test_log::test]
fn routes_sharing_a_shape_share_the_bundle() {
    let routers = loaded_shape_routers(
        chain_network(),
        &[("outbound", Some("shape")), ("express", Some("shape"))],
    );

    let (line, outbound) = ids("outbound");
    let (_, express) = ids("express");

    let first = routers.bundle(&line, &outbound).expect("shaped route");
    let second = routers.bundle(&line, &express).expect("shaped route");

    assert!(Arc::ptr_eq(first, second));
    assert!(Arc::ptr_eq(&first.network, &second.network));
    assert!(Arc::ptr_eq(&first.costing, &second.costing));
    assert!(Arc::ptr_eq(
        first,
        routers
            .shape_bundle(&ShapeId::from("shape"))
            .expect("shape was used")
    ));
    assert_eq!(routers.bundle_builds(), 1);
}

#[test_log::test]
fn routes_without_shape_are_artificial() {
    let routers = loaded_shape_routers(
        chain_network(),
        &[
            ("shaped", Some("shape")),
            ("unknown", Some("missing")),
            ("bare", None),
        ],
    );

    let (line, shaped) = ids("shaped");
    assert_eq!(routers.is_artificial(&line, &shaped), Some(false));

    let network = chain_network();
    let candidate = LinkCandidate::from_network(&network, &LinkId::from("ab")).expect("known");

    for route in ["unknown", "bare"] {
        let (line, route) = ids(route);
        assert_eq!(routers.is_artificial(&line, &route), Some(true));
        assert!(routers.bundle(&line, &route).is_none());
        assert!(routers
            .least_cost_path(&"a".into(), &"c".into(), &line, &route)
            .is_none());
        assert!(routers
            .least_cost_path_between(&candidate, &candidate, &line, &route)
            .is_none());
        assert!(routers
            .link_candidate_travel_cost(&line, &route, &candidate)
            .is_none());
    }

    let (line, stranger) = ids("stranger");
    assert_eq!(routers.is_artificial(&line, &stranger), None);
    assert_eq!(routers.bundle_builds(), 1);
}

#[test_log::test]
fn path_follows_shape_over_shorter_detour() {
    let routers = loaded_shape_routers(chain_network(), &[("outbound", Some("shape"))]);
    let (line, route) = ids("outbound");

    let path = routers
        .least_cost_path(&"a".into(), &"c".into(), &line, &route)
        .expect("c is reachable");

    // The detour a -> x -> y -> c is shorter, but its middle link lies
    // ~60.9 from the shape and is tripled in cost.
    assert_eq!(link_ids(&path), vec!["ab", "bc"]);
    assert_relative_eq!(path.travel_cost, 25.612, epsilon = 1e-3);

    let mut standard = ModeScheduleRouters::new(
        bus_config(),
        Arc::new(bus_schedule(LINE, &[("outbound", Some("shape"))])),
        Arc::new(chain_network()),
    )
    .expect("valid configuration");
    standard.load().expect("first load");

    let unbiased = standard
        .least_cost_path(&"a".into(), &"c".into(), &line, &route)
        .expect("c is reachable");
    assert_eq!(link_ids(&unbiased), vec!["ax", "xy", "yc"]);
}

#[test_log::test]
fn buffer_is_a_hard_cutoff() {
    let mut network = chain_network();
    network
        .add_node(crate::network::Node::new("z", Point::new(1_000.0, 1_000.0)))
        .expect("unique node");

    // A shortcut via z, nearly free of cost but far outside the buffer.
    for (id, from, to) in [("az", "a", "z"), ("zc", "z", "c")] {
        network
            .add_link(crate::network::Link::new(id, from, to, 1.0, 10.0, [BUS]))
            .expect("valid link");
    }

    let routers = loaded_shape_routers(network, &[("outbound", Some("shape"))]);
    let (line, route) = ids("outbound");

    let bundle = routers.bundle(&line, &route).expect("shaped route");
    assert!(!bundle.network.contains_node(&NodeId::from("z")));
    assert!(!bundle.network.contains_link(&LinkId::from("az")));

    let path = routers
        .least_cost_path(&"a".into(), &"c".into(), &line, &route)
        .expect("c is reachable");
    assert_eq!(link_ids(&path), vec!["ab", "bc"]);

    assert!(routers
        .least_cost_path(&"a".into(), &"z".into(), &line, &route)
        .is_none());
}

#[test]
fn unknown_endpoints_yield_no_path() {
    let routers = loaded_shape_routers(chain_network(), &[("outbound", Some("shape"))]);
    let (line, route) = ids("outbound");

    assert!(routers
        .least_cost_path(&"a".into(), &"nowhere".into(), &line, &route)
        .is_none());
    assert!(routers
        .least_cost_path(&"nowhere".into(), &"c".into(), &line, &route)
        .is_none());
}

#[test]
fn candidate_paths_run_from_link_end_to_link_start() {
    let network = chain_network();
    let routers = loaded_shape_routers(chain_network(), &[("outbound", Some("shape"))]);
    let (line, route) = ids("outbound");

    let from = LinkCandidate::from_network(&network, &LinkId::from("ab")).expect("known");
    let to = LinkCandidate::from_network(&network, &LinkId::from("ca")).expect("known");

    // From the end of ab (b) to the start of ca (c).
    let path = routers
        .least_cost_path_between(&from, &to, &line, &route)
        .expect("c is reachable from b");

    assert_eq!(link_ids(&path), vec!["bc"]);
    assert_eq!(path.nodes.first(), Some(&NodeId::from("b")));
    assert_eq!(path.nodes.last(), Some(&NodeId::from("c")));
}

#[test]
fn candidate_cost_is_biased_by_the_shape() {
    let network = chain_network();
    let routers = loaded_shape_routers(chain_network(), &[("outbound", Some("shape"))]);
    let (line, route) = ids("outbound");

    let on_shape = LinkCandidate::from_network(&network, &LinkId::from("ax")).expect("known");
    let off_shape = LinkCandidate::from_network(&network, &LinkId::from("xy")).expect("known");

    let cost = routers
        .link_candidate_travel_cost(&line, &route, &on_shape)
        .expect("shaped route");
    assert_relative_eq!(cost, 6.7082, epsilon = 1e-4);

    let cost = routers
        .link_candidate_travel_cost(&line, &route, &off_shape)
        .expect("shaped route");
    assert_relative_eq!(cost, 240.0);
}

#[test]
fn minimal_cost_follows_policy() {
    let from = TransitRouteStop::new(StopFacility::new("s1", Point::new(0.0, 0.0)))
        .with_offsets(None, Some(60.0));
    let to = TransitRouteStop::new(StopFacility::new("s2", Point::new(300.0, 400.0)))
        .with_offsets(Some(150.0), Some(180.0));
    let (line, route) = ids("outbound");

    let routers = loaded_shape_routers(chain_network(), &[("outbound", Some("shape"))]);
    assert_relative_eq!(routers.minimal_travel_cost(&from, &to, &line, &route), 500.0);

    let timed = ModeScheduleRouters::new(
        bus_config().with_travel_cost_type(TravelCostType::TravelTime),
        Arc::new(bus_schedule(LINE, &[("outbound", None)])),
        Arc::new(chain_network()),
    )
    .expect("valid configuration");
    assert_relative_eq!(timed.minimal_travel_cost(&from, &to, &line, &route), 90.0);

    // An undefined departure offers no lower bound on time.
    assert_relative_eq!(timed.minimal_travel_cost(&to, &from, &line, &route), 0.0);
}

#[test]
fn unassigned_modes_route_over_nothing() {
    let mut line = TransitLine::new(LINE);
    line.add_route(TransitRoute::new("ferry", "ferry").with_shape("shape"));
    let mut schedule = TransitSchedule::new();
    schedule.add_line(line);

    let mut routers = ShapeScheduleRouters::new(
        bus_config(),
        Arc::new(schedule),
        Arc::new(chain_network()),
        [chain_shape("shape")],
    )
    .expect("valid configuration");
    routers.load().expect("first load");

    let (line, route) = ids("ferry");
    assert_eq!(routers.is_artificial(&line, &route), Some(false));

    let bundle = routers.bundle(&line, &route).expect("shaped route");
    assert!(bundle.network.is_empty());
    assert!(routers
        .least_cost_path(&"a".into(), &"c".into(), &line, &route)
        .is_none());
}

#[test]
fn load_runs_once() {
    let mut routers = loaded_shape_routers(chain_network(), &[("outbound", Some("shape"))]);
    assert!(matches!(routers.load(), Err(RouterError::AlreadyLoaded)));
    assert_eq!(routers.bundle_builds(), 1);
}

#[test]
fn queries_before_load_find_nothing() {
    let routers = ShapeScheduleRouters::new(
        bus_config(),
        Arc::new(bus_schedule(LINE, &[("outbound", Some("shape"))])),
        Arc::new(chain_network()),
        [chain_shape("shape")],
    )
    .expect("valid configuration");
    let (line, route) = ids("outbound");

    assert_eq!(routers.is_artificial(&line, &route), None);
    assert!(routers
        .least_cost_path(&"a".into(), &"c".into(), &line, &route)
        .is_none());
}

#[test]
fn malformed_configuration_is_rejected() {
    let result = ShapeScheduleRouters::new(
        MappingConfig::new(0.0),
        Arc::new(bus_schedule(LINE, &[("outbound", Some("shape"))])),
        Arc::new(chain_network()),
        [chain_shape("shape")],
    );

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidMaxWeightDistance(_)))
    ));
}

#[test]
fn mode_routers_share_bundles_per_mode_set() {
    let mut network = chain_network();
    add_straight_link(&mut network, "ba", "b", "a", ["tram"]);

    let mut line = TransitLine::new(LINE);
    line.add_route(TransitRoute::new("bus-1", BUS))
        .add_route(TransitRoute::new("bus-2", BUS))
        .add_route(TransitRoute::new("coach", "coach"))
        .add_route(TransitRoute::new("tram", "tram"));
    let mut schedule = TransitSchedule::new();
    schedule.add_line(line);

    let config = bus_config()
        .with_mode_assignment("coach", [BUS])
        .with_mode_assignment("tram", ["tram"]);

    let mut routers =
        ModeScheduleRouters::new(config, Arc::new(schedule), Arc::new(network))
            .expect("valid configuration");
    routers.load().expect("first load");

    let bundle = |route: &str| {
        let (line, route) = ids(route);
        Arc::clone(routers.bundle(&line, &route).expect("every route is routed"))
    };

    assert!(Arc::ptr_eq(&bundle("bus-1"), &bundle("bus-2")));
    assert!(Arc::ptr_eq(&bundle("bus-1"), &bundle("coach")));
    assert!(!Arc::ptr_eq(&bundle("bus-1"), &bundle("tram")));
    assert_eq!(routers.bundle_builds(), 2);

    let (line, tram) = ids("tram");
    assert_eq!(routers.is_artificial(&line, &tram), Some(false));
    let path = routers
        .least_cost_path(&"b".into(), &"a".into(), &line, &tram)
        .expect("tram runs from b to a");
    assert_eq!(link_ids(&path), vec!["ba"]);
    assert!(matches!(routers.load(), Err(RouterError::AlreadyLoaded)));
}

#[test]
fn loaded_routers_answer_concurrent_queries() {
    let routers = loaded_shape_routers(
        chain_network(),
        &[("outbound", Some("shape")), ("express", Some("shape"))],
    );

    std::thread::scope(|scope| {
        for route in ["outbound", "express"] {
            let routers = &routers;
            scope.spawn(move || {
                let (line, route) = ids(route);
                let path = routers
                    .least_cost_path(&"a".into(), &"c".into(), &line, &route)
                    .expect("c is reachable");
                assert_eq!(link_ids(&path), vec!["ab", "bc"]);
            });
        }
    });
}
