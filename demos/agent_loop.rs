//! Three access points learning an OBSS_PD level each.
//!
//! Run with `RUST_LOG=srmab=debug` to see every observation, or
//! `RUST_LOG=srmab=trace` for every selection too.

use srmab::power::{dbm_to_pw, pw_to_dbm};
use srmab::{
    AgentConfigBuilder, BanditAgent, BssIdentity, InterferenceClass, NonSrgObssPdParams,
    ObssPdParams, SpatialReuseParams, SrgObssPdParams, StrategyKind, Wlan,
};
use tracing_subscriber::EnvFilter;

const LEVELS_DBM: [f64; 6] = [-82.0, -79.0, -76.0, -73.0, -70.0, -67.0];
const ROUNDS: usize = 2_000;

fn main() -> srmab::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let params = SpatialReuseParams {
        obss_pd: ObssPdParams {
            obss_pd_min: dbm_to_pw(-82.0),
            obss_pd_max: dbm_to_pw(-62.0),
            tx_power_ref: dbm_to_pw(21.0),
            tx_power: dbm_to_pw(18.0),
        },
        srg: SrgObssPdParams {
            srg_obss_pd_min: dbm_to_pw(-82.0),
            srg_obss_pd_max: dbm_to_pw(-68.0),
            srg_obss_pd_min_offset: dbm_to_pw(1.0),
            srg_obss_pd_max_offset: dbm_to_pw(14.0),
        },
        non_srg: NonSrgObssPdParams {
            non_srg_obss_pd_min: dbm_to_pw(-82.0),
            non_srg_obss_pd_max: dbm_to_pw(-74.0),
            non_srg_obss_pd_max_offset: dbm_to_pw(8.0),
        },
    };
    let levels: Vec<f64> = LEVELS_DBM.iter().map(|&d| dbm_to_pw(d)).collect();

    let wlans = [
        ("A", BssIdentity::new(1, 1), StrategyKind::EpsilonGreedy),
        ("B", BssIdentity::new(2, 1), StrategyKind::ThompsonSampling),
        ("C", BssIdentity::new(3, 2), StrategyKind::ThompsonSampling),
    ];

    let mut aps: Vec<(Wlan, BanditAgent, InterferenceClass)> = Vec::new();
    for (id, (code, bss, strategy)) in wlans.into_iter().enumerate() {
        let id = id as u32;
        let wlan = Wlan {
            wlan_id: id,
            wlan_code: code.to_string(),
            ap_id: id * 10,
            sta_ids: (1..=3).map(|s| id * 10 + s).collect(),
            spatial_reuse_enabled: true,
            bss,
        };
        let agent = AgentConfigBuilder::new()
            .agent_id(id)
            .num_actions(LEVELS_DBM.len())
            .strategy(strategy)
            .seed(wlan.agent_seed(2024))
            .env_prefix("SRMAB")
            .build_agent()?;
        // Everyone hears WLAN A; A hears B.
        let neighbour = if id == 0 { BssIdentity::new(2, 1) } else { BssIdentity::new(1, 1) };
        let class = wlan.bss.interference_class(&neighbour.tx_info());
        println!("{wlan}");
        println!("  hears {class:?}, legal actions {:?}", params.legal_indices(class, &levels));
        aps.push((wlan, agent, class));
    }

    // Throughput proxy: higher thresholds win more transmit opportunities
    // until the regulator says no.
    for round in 0..ROUNDS {
        for (_, agent, class) in aps.iter_mut() {
            let action = agent.select_next_action();
            let level = levels[action];
            let reward = match params.permits(*class, level) {
                Some(false) => 0.0,
                _ if !params.permits_obss_pd(level) => 0.1,
                _ => (pw_to_dbm(level) + 90.0) / 30.0,
            };
            agent.observe(action, reward)?;
        }
        if round % 500 == 499 {
            for (_, agent, _) in &aps {
                agent.log_statistics(round as f64);
            }
        }
    }

    for (wlan, agent, _) in &aps {
        println!("\nWLAN {} ({}):", wlan.wlan_code, agent.strategy_name());
        println!("{}", agent.snapshot());
    }
    Ok(())
}
