use crate::config::TravelCostType;
use crate::id::{LinkId, NodeId, ShapeId};
use crate::route::costing::ShapeCost;
use crate::route::primitives::{BundleCache, BundleContext};
use crate::route::{PathCalculator, RouterBundle};
use crate::schedule::LinkCandidate;
use crate::test::{bus_config, chain_network, chain_shape, BUS};

use approx::assert_relative_eq;
use std::collections::BTreeSet;
use std::sync::Arc;

fn link_ids(path: &crate::route::Path) -> Vec<&str> {
    path.links.iter().map(|link| link.id.as_str()).collect()
}

fn unbiased_calculator(cost_type: TravelCostType) -> PathCalculator<ShapeCost> {
    PathCalculator::new(
        Arc::new(chain_network()),
        Arc::new(ShapeCost::unbiased(cost_type)),
    )
}

#[test_log::test]
fn unbiased_search_takes_the_shortest_way() {
    let calculator = unbiased_calculator(TravelCostType::LinkLength);
    let path = calculator
        .path(&"a".into(), &"c".into())
        .expect("c is reachable");

    assert_eq!(link_ids(&path), vec!["ax", "xy", "yc"]);
    assert_eq!(
        path.nodes,
        ["a", "x", "y", "c"].map(NodeId::from).to_vec()
    );
    assert_relative_eq!(path.travel_cost, 214.164, epsilon = 1e-3);
    assert_relative_eq!(path.travel_time, 21.4164, epsilon = 1e-4);
}

#[test_log::test]
fn shape_costing_pulls_search_onto_the_shape() {
    let costing = ShapeCost::new(
        Arc::new(chain_shape("shape")),
        TravelCostType::LinkLength,
        50.0,
    );
    let calculator = PathCalculator::new(Arc::new(chain_network()), Arc::new(costing));

    let path = calculator
        .path(&"a".into(), &"c".into())
        .expect("c is reachable");

    assert_eq!(link_ids(&path), vec!["ab", "bc"]);
    // Both links lie on the shape, costing a tenth of their length.
    assert_relative_eq!(path.travel_cost, 25.612, epsilon = 1e-3);
    // Travel time stays physical.
    assert_relative_eq!(path.travel_time, 25.612, epsilon = 1e-3);
}

#[test]
fn travel_time_policy_weighs_by_time() {
    let calculator = unbiased_calculator(TravelCostType::TravelTime);
    let path = calculator
        .path(&"a".into(), &"c".into())
        .expect("c is reachable");

    assert_relative_eq!(path.travel_cost, path.travel_time);
}

#[test]
fn missing_or_unreachable_nodes_have_no_path() {
    let calculator = unbiased_calculator(TravelCostType::LinkLength);

    assert!(calculator.path(&"a".into(), &"nowhere".into()).is_none());
    assert!(calculator.path(&"nowhere".into(), &"a".into()).is_none());

    let mut network = chain_network();
    network
        .add_node(crate::network::Node::new("island", geo::Point::new(5.0, 5.0)))
        .expect("unique node");
    let calculator = PathCalculator::new(
        Arc::new(network),
        Arc::new(ShapeCost::unbiased(TravelCostType::LinkLength)),
    );
    assert!(calculator.path(&"a".into(), &"island".into()).is_none());
}

#[test]
fn path_to_self_is_empty() {
    let calculator = unbiased_calculator(TravelCostType::LinkLength);
    let path = calculator
        .path(&"b".into(), &"b".into())
        .expect("b reaches itself");

    assert!(path.links.is_empty());
    assert_eq!(path.nodes, vec![NodeId::from("b")]);
    assert_eq!(path.travel_cost, 0.0);
}

#[test]
fn repeated_queries_agree() {
    let calculator = unbiased_calculator(TravelCostType::LinkLength);

    let first = calculator.path(&"a".into(), &"c".into());
    let second = calculator.path(&"a".into(), &"c".into());
    let back = calculator.path(&"c".into(), &"a".into()).expect("ca exists");

    assert_eq!(first, second);
    assert_eq!(link_ids(&back), vec!["ca"]);
}

#[test]
fn calculator_is_shareable_across_threads() {
    let calculator = unbiased_calculator(TravelCostType::LinkLength);

    std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| scope.spawn(|| calculator.path(&"a".into(), &"c".into())))
            .collect::<Vec<_>>();

        for handle in handles {
            let path = handle.join().expect("query thread").expect("path");
            assert_eq!(link_ids(&path), vec!["ax", "xy", "yc"]);
        }
    });
}

#[test]
fn bundle_clips_and_biases_around_shape() {
    let network = chain_network();
    let shape = Arc::new(chain_shape("shape"));
    let config = bus_config().with_cut_buffer(50.0);
    let modes = BTreeSet::from([BUS.to_string()]);

    let bundle = RouterBundle::build(&network, &modes, Some(&shape), &config);

    // x and y lie outside of the 50 unit buffer.
    assert_eq!(bundle.network.node_count(), 3);
    assert!(bundle.costing.shape().is_some());
    assert!(Arc::ptr_eq(bundle.calculator.network(), &bundle.network));
    assert!(Arc::ptr_eq(bundle.calculator.costing(), &bundle.costing));

    let candidate =
        LinkCandidate::from_network(&network, &LinkId::from("xy")).expect("known link");
    assert_relative_eq!(bundle.link_cost(&candidate), 240.0);
}

#[test]
fn bundle_cache_builds_once_per_key() {
    let network = chain_network();
    let config = bus_config();
    let modes = BTreeSet::from([BUS.to_string()]);
    let shape = Arc::new(chain_shape("shape"));

    let context = BundleContext {
        network: &network,
        config: &config,
        modes: &modes,
        shape: Some(&shape),
    };

    let mut cache = BundleCache::<ShapeId>::default();
    let first = cache.query(&context, ShapeId::from("shape"));
    let second = cache.query(&context, ShapeId::from("shape"));
    let other = cache.query(&context, ShapeId::from("other"));

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(cache.metadata().builds, 2);
    assert_eq!(cache.len(), 2);
}
