//! End-to-end scenarios: several access points, each with its own agent,
//! learning which OBSS_PD level to operate at.

use srmab::power::dbm_to_pw;
use srmab::{
    AgentConfigBuilder, BanditAgent, BanditError, BssIdentity, InterferenceClass,
    NonSrgObssPdParams, ObssPdParams, RoundRobin, SpatialReuseParams, SrgObssPdParams,
    StrategyKind, TxInfo, Wlan,
};

/// Candidate OBSS_PD levels in dBm, one per action.
const LEVELS_DBM: [f64; 5] = [-82.5, -78.5, -74.5, -70.5, -66.5];

fn sr_params() -> SpatialReuseParams {
    SpatialReuseParams {
        obss_pd: ObssPdParams {
            obss_pd_min: dbm_to_pw(-82.0),
            obss_pd_max: dbm_to_pw(-62.0),
            tx_power_ref: dbm_to_pw(21.0),
            tx_power: dbm_to_pw(21.0),
        },
        srg: SrgObssPdParams {
            srg_obss_pd_min: dbm_to_pw(-80.0),
            srg_obss_pd_max: dbm_to_pw(-65.0),
            srg_obss_pd_min_offset: dbm_to_pw(2.0),
            srg_obss_pd_max_offset: dbm_to_pw(15.0),
        },
        non_srg: NonSrgObssPdParams {
            non_srg_obss_pd_min: dbm_to_pw(-82.0),
            non_srg_obss_pd_max: dbm_to_pw(-72.0),
            non_srg_obss_pd_max_offset: dbm_to_pw(8.0),
        },
    }
}

fn wlan(id: u32, code: &str, color: i32, srg: i32) -> Wlan {
    Wlan {
        wlan_id: id,
        wlan_code: code.to_string(),
        ap_id: id * 10,
        sta_ids: vec![id * 10 + 1, id * 10 + 2],
        spatial_reuse_enabled: true,
        bss: BssIdentity::new(color, srg),
    }
}

/// Higher thresholds pay more, but an illegal level earns nothing.
fn reward(params: &SpatialReuseParams, class: InterferenceClass, action: usize) -> f64 {
    let level = dbm_to_pw(LEVELS_DBM[action]);
    match params.permits(class, level) {
        Some(false) => 0.0,
        _ => 0.2 + 0.15 * action as f64,
    }
}

struct Ap {
    wlan: Wlan,
    agent: BanditAgent,
    /// Class of the interference this AP mostly hears.
    class: InterferenceClass,
}

fn deployment(strategy: StrategyKind, base_seed: u64) -> Vec<Ap> {
    let a = wlan(0, "A", 1, 1);
    let b = wlan(1, "B", 2, 1);
    let c = wlan(2, "C", 3, 2);
    let heard: [TxInfo; 3] = [b.bss.tx_info(), a.bss.tx_info(), a.bss.tx_info()];
    [a, b, c]
        .into_iter()
        .zip(heard)
        .map(|(w, tx)| {
            let agent = AgentConfigBuilder::new()
                .agent_id(w.wlan_id)
                .num_actions(LEVELS_DBM.len())
                .strategy(strategy)
                .seed(w.agent_seed(base_seed))
                .build_agent()
                .unwrap();
            let class = w.bss.interference_class(&tx);
            Ap {
                wlan: w,
                agent,
                class,
            }
        })
        .collect()
}

fn run(aps: &mut [Ap], rounds: usize) -> Vec<Vec<usize>> {
    let params = sr_params();
    let mut history = vec![Vec::with_capacity(rounds); aps.len()];
    for _ in 0..rounds {
        for (ap, h) in aps.iter_mut().zip(history.iter_mut()) {
            let action = ap.agent.select_next_action();
            ap.agent
                .observe(action, reward(&params, ap.class, action))
                .unwrap();
            h.push(action);
        }
    }
    history
}

fn most_selected(agent: &BanditAgent) -> usize {
    agent
        .arms()
        .iter()
        .enumerate()
        .max_by_key(|(i, a)| (a.times_selected(), std::cmp::Reverse(*i)))
        .map(|(i, _)| i)
        .unwrap()
}

#[test]
fn deployment_classes_match_topology() {
    let aps = deployment(StrategyKind::EpsilonGreedy, 0);
    let classes: Vec<_> = aps.iter().map(|ap| ap.class).collect();
    assert_eq!(
        classes,
        vec![
            InterferenceClass::SrgObss,
            InterferenceClass::SrgObss,
            InterferenceClass::NonSrgObss
        ]
    );
}

#[test]
fn epsilon_greedy_agents_settle_on_best_legal_level() {
    let mut aps = deployment(StrategyKind::EpsilonGreedy, 11);
    run(&mut aps, 3_000);
    let params = sr_params();
    let levels: Vec<f64> = LEVELS_DBM.iter().map(|&d| dbm_to_pw(d)).collect();
    for ap in &aps {
        let legal = params.legal_indices(ap.class, &levels);
        let best = *legal.last().unwrap();
        assert_eq!(
            most_selected(&ap.agent),
            best,
            "{}: {}",
            ap.wlan.wlan_code,
            ap.agent.snapshot()
        );
    }
    // SRG neighbours may go up to -66.5 dBm, non-SRG only to -74.5 dBm.
    assert_eq!(most_selected(&aps[0].agent), 4);
    assert_eq!(most_selected(&aps[2].agent), 2);
}

#[test]
fn thompson_agents_settle_on_best_legal_level() {
    let mut aps = deployment(StrategyKind::ThompsonSampling, 5);
    run(&mut aps, 3_000);
    assert_eq!(most_selected(&aps[0].agent), 4, "{}", aps[0].agent.snapshot());
    assert_eq!(most_selected(&aps[1].agent), 4, "{}", aps[1].agent.snapshot());
    assert_eq!(most_selected(&aps[2].agent), 2, "{}", aps[2].agent.snapshot());
}

#[test]
fn agents_do_not_share_state() {
    let mut aps = deployment(StrategyKind::EpsilonGreedy, 3);
    run(&mut aps, 50);
    let before = aps[1].agent.snapshot();
    for _ in 0..20 {
        let a = aps[0].agent.select_next_action();
        aps[0].agent.observe(a, 1.0).unwrap();
    }
    assert_eq!(aps[1].agent.snapshot(), before);
}

#[test]
fn same_base_seed_replays_the_same_run() {
    for strategy in StrategyKind::all() {
        let mut first = deployment(strategy, 77);
        let mut second = deployment(strategy, 77);
        assert_eq!(run(&mut first, 200), run(&mut second, 200));
        for (x, y) in first.iter().zip(&second) {
            assert_eq!(x.agent.snapshot(), y.agent.snapshot());
        }
    }
}

#[test]
fn engine_sentinel_index_is_an_error_not_a_noop() {
    let mut aps = deployment(StrategyKind::EpsilonGreedy, 0);
    let agent = &mut aps[0].agent;
    assert!(matches!(
        agent.observe_signed(-1, 1.0),
        Err(BanditError::InvalidAction { index: -1, num_actions: 5 })
    ));
    assert_eq!(agent.snapshot().total_observations(), 0);
}

#[test]
fn round_robin_station_polling_per_wlan() {
    let aps = deployment(StrategyKind::EpsilonGreedy, 0);
    let mut cursors = vec![RoundRobin::new(); aps.len()];
    let mut polled = Vec::new();
    for _ in 0..2 {
        for (ap, rr) in aps.iter().zip(cursors.iter_mut()) {
            polled.push(*rr.next_in(&ap.wlan.sta_ids).unwrap());
        }
    }
    assert_eq!(polled, vec![1, 11, 21, 2, 12, 22]);
}

#[test]
fn config_layers_merge_in_order() {
    let cfg = AgentConfigBuilder::new()
        .toml_str(
            r#"
            agent_id = 4
            num_actions = 3
            strategy = "thompson_sampling"

            [thompson]
            posterior = "beta"
            "#,
        )
        .toml_str("num_actions = 6")
        .seed(9)
        .build()
        .unwrap();
    assert_eq!(cfg.agent_id, 4);
    assert_eq!(cfg.num_actions, 6);
    assert_eq!(cfg.strategy, StrategyKind::ThompsonSampling);
    assert_eq!(cfg.thompson.posterior, srmab::Posterior::Beta);
    assert_eq!(cfg.seed, Some(9));

    let agent = BanditAgent::new(cfg).unwrap();
    assert_eq!(agent.strategy_name(), "thompson_sampling");
    assert_eq!(agent.epsilon(), None);
}

#[test]
fn invalid_layered_config_is_rejected() {
    let err = AgentConfigBuilder::new()
        .toml_str("num_actions = 0")
        .build()
        .unwrap_err();
    assert!(matches!(err, BanditError::NoActions));

    let err = AgentConfigBuilder::new()
        .num_actions(3)
        .initial_epsilon(1.5)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        BanditError::InvalidParameter {
            name: "initial_epsilon",
            ..
        }
    ));

    let err = AgentConfigBuilder::new()
        .toml_str(r#"strategy = "ucb""#)
        .build()
        .unwrap_err();
    assert!(matches!(err, BanditError::Config(_)));
}
