use crate::contract::{
    execute, instantiate, migrate, query, run_migration, sudo, within_multiplicative_tolerance,
    MigrationOutcome,
};
use crate::error::ContractError;
use crate::genesis::load_genesis;
use crate::links::get_all_links;
use crate::pools::{
    create_balancer_pool, create_concentrated_pool, get_pool, next_pool_id, ConcentratedPoolSpec,
};
use crate::registry::AssetPairRegistry;
use crate::state::{CONFIG, MIGRATION_STATUS};
use crate::superfluid::get_asset;
use crate::transaction::transactional;
use crate::treasury::{fund, get_all_balances, get_balance};
use crate::twap::{
    flip_record, get_historical_records_by_pool, get_historical_records_by_time,
    get_most_recent_records, store_new_record,
};
use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info, MockApi, MockStorage};
use cosmwasm_std::{
    attr, coin, from_json, Addr, Decimal, Decimal256, Storage, Timestamp, Uint128,
};
use cw2::set_contract_version;
use migration_periphery::asset_pair::AssetPair;
use migration_periphery::msg::{
    Config, ExecuteMsg, GenesisPool, GenesisState, InstantiateMsg, MigrateMsg,
    MigrationInfoResponse, MigrationState, OrderingRule, QueryMsg, SudoMsg,
};
use migration_periphery::pool::{
    BalancerToConcentratedLink, Pool, SuperfluidAsset, SuperfluidAssetType,
};
use migration_periphery::twap::TwapRecord;

const ATOM: &str = "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2";
const AKT: &str = "ibc/1480B8FD20AD5FCAE81EA87584D269547DD4D436843C1D20F15E00EB64743EF4";
const USDC: &str = "ibc/D189335C6E4A68B513C10AB227BF1C1D38C746766278BA3EEB4FB14124F1D858";

fn config() -> Config {
    Config {
        owner: Addr::unchecked("owner"),
        upgrade_name: "v16".to_string(),
        upgrade_height: 12_345,
        ordering: OrderingRule::Lexicographic {},
        twap_ordering: OrderingRule::QuoteFirst {
            quote_denom: "uosmo".to_string(),
        },
        tick_spacing: 100,
        funding_notional: Uint128::new(1_000_000),
    }
}

fn instantiate_msg(upgrade_height: u64) -> InstantiateMsg {
    InstantiateMsg {
        owner: Some("owner".to_string()),
        upgrade_name: "v16".to_string(),
        upgrade_height,
        ordering: None,
        twap_ordering: None,
        tick_spacing: None,
        funding_notional: None,
        genesis: None,
    }
}

fn record(pool_id: u64, secs: u64, asset0: &str, asset1: &str, sp0: Decimal) -> TwapRecord {
    TwapRecord::new(
        pool_id,
        Timestamp::from_seconds(secs),
        asset0,
        asset1,
        sp0,
        Decimal::from_ratio(secs, 1u128),
        Decimal::from_ratio(secs * 2, 1u128),
        Decimal::from_ratio(secs * 3, 1u128),
    )
    .unwrap()
}

/// Pools 1 and 2 are unrelated, pool 3 trades foo at 2 uosmo.
fn seed_foo_pool(storage: &mut dyn Storage) {
    create_balancer_pool(
        storage,
        vec![coin(1_000, "bar"), coin(1_000, "uosmo")],
        Decimal::zero(),
    )
    .unwrap();
    create_balancer_pool(
        storage,
        vec![coin(1_000, "baz"), coin(1_000, "uosmo")],
        Decimal::zero(),
    )
    .unwrap();
    create_balancer_pool(
        storage,
        vec![coin(5_000_000_000, "foo"), coin(10_000_000_000, "uosmo")],
        Decimal::permille(2),
    )
    .unwrap();
    fund(storage, &coin(1_000_000, "uosmo")).unwrap();
    fund(storage, &coin(2_000_000, "foo")).unwrap();
}

/// Creates a concentrated foo/uosmo pool whose TWAP history still has the base asset first.
fn seed_misoriented_cl_pool(storage: &mut dyn Storage) -> u64 {
    let cl_pool = create_concentrated_pool(
        storage,
        ConcentratedPoolSpec {
            token0: "foo".to_string(),
            token1: "uosmo".to_string(),
            initial_price: Decimal256::from_ratio(2u128, 1u128),
            tick_spacing: 100,
            spread_factor: Decimal::permille(2),
            token0_amount: Uint128::new(1_000),
            token1_amount: Uint128::new(2_000),
        },
    )
    .unwrap();
    store_new_record(
        storage,
        &record(cl_pool.id, 100, "foo", "uosmo", Decimal::from_ratio(2u128, 1u128)),
    )
    .unwrap();
    store_new_record(
        storage,
        &record(cl_pool.id, 200, "foo", "uosmo", Decimal::percent(250)),
    )
    .unwrap();
    cl_pool.id
}

fn foo_registry() -> AssetPairRegistry {
    AssetPairRegistry::new(vec![AssetPair::new("foo", 3, true, Decimal::permille(2))]).unwrap()
}

fn migrate_in_transaction(
    storage: &mut MockStorage,
    registry: &AssetPairRegistry,
) -> Result<MigrationOutcome, ContractError> {
    let api = MockApi::default();
    let config = config();
    transactional(storage, |store| {
        run_migration(store, &api, &config, registry)
    })
}

/// Seeds the balancer pools listed for test chains.
fn seed_test_chain(storage: &mut dyn Storage, quote_funding: u128) {
    for base in [ATOM, AKT, USDC] {
        create_balancer_pool(
            storage,
            vec![coin(1_000_000_000, base), coin(2_000_000_000, "uosmo")],
            Decimal::permille(2),
        )
        .unwrap();
        fund(storage, &coin(1_000_000, base)).unwrap();
    }
    fund(storage, &coin(quote_funding, "uosmo")).unwrap();
}

#[test]
fn migrates_single_pair() {
    let mut storage = MockStorage::new();
    seed_foo_pool(&mut storage);

    let outcome = migrate_in_transaction(&mut storage, &foo_registry()).unwrap();
    assert!(outcome.reoriented_pools.is_empty());
    assert_eq!(outcome.migrated.len(), 1);

    let cl_pool = match get_pool(&storage, 4).unwrap() {
        Pool::Concentrated(cl_pool) => cl_pool,
        Pool::Balancer(_) => panic!("pool 4 must be concentrated"),
    };
    assert_eq!(cl_pool, outcome.migrated[0].cl_pool);
    assert_eq!(cl_pool.token0, "foo");
    assert_eq!(cl_pool.token1, "uosmo");
    assert!(within_multiplicative_tolerance(
        Decimal256::from_ratio(2u128, 1u128),
        cl_pool.current_price().unwrap(),
        Decimal256::permille(1)
    )
    .unwrap());

    assert_eq!(
        get_all_links(&storage).unwrap(),
        vec![BalancerToConcentratedLink {
            balancer_pool_id: 3,
            cl_pool_id: 4
        }]
    );
    assert_eq!(get_balance(&storage, "uosmo").unwrap(), Uint128::zero());
    assert_eq!(
        get_balance(&storage, "foo").unwrap(),
        Uint128::new(2_000_000 - 499_950)
    );
    assert_eq!(
        get_asset(&storage, "cl/pool/4").unwrap(),
        Some(SuperfluidAsset {
            denom: "cl/pool/4".to_string(),
            asset_type: SuperfluidAssetType::ConcentratedShare,
        })
    );
    assert_eq!(next_pool_id(&storage).unwrap(), 5);
}

#[test]
fn missing_pool_aborts_everything() {
    let mut storage = MockStorage::new();
    seed_foo_pool(&mut storage);
    let cl_pool_id = seed_misoriented_cl_pool(&mut storage);
    assert_eq!(cl_pool_id, 4);

    let balances = get_all_balances(&storage).unwrap();
    let most_recent = get_most_recent_records(&storage, cl_pool_id).unwrap();
    let historical = get_historical_records_by_pool(&storage, cl_pool_id).unwrap();
    let by_time = get_historical_records_by_time(&storage).unwrap();

    // foo migrates first, then pool 9 is looked up and missing
    let registry = AssetPairRegistry::new(vec![
        AssetPair::new("bar", 9, false, Decimal::permille(2)),
        AssetPair::new("foo", 3, true, Decimal::permille(2)),
    ])
    .unwrap();
    let err = migrate_in_transaction(&mut storage, &registry).unwrap_err();
    assert_eq!(err, ContractError::PoolNotFound { pool_id: 9 });

    assert_eq!(get_all_balances(&storage).unwrap(), balances);
    assert!(get_all_links(&storage).unwrap().is_empty());
    assert_eq!(next_pool_id(&storage).unwrap(), 5);
    assert_eq!(
        get_pool(&storage, 5).unwrap_err(),
        ContractError::PoolNotFound { pool_id: 5 }
    );
    assert_eq!(get_asset(&storage, "cl/pool/5").unwrap(), None);

    // the TWAP reorientation ran before the failure and is rolled back as well
    assert_eq!(
        get_most_recent_records(&storage, cl_pool_id).unwrap(),
        most_recent
    );
    assert_eq!(
        get_historical_records_by_pool(&storage, cl_pool_id).unwrap(),
        historical
    );
    assert_eq!(get_historical_records_by_time(&storage).unwrap(), by_time);
}

#[test]
fn insufficient_treasury_aborts_everything() {
    let mut storage = MockStorage::new();
    seed_foo_pool(&mut storage);
    let balances = get_all_balances(&storage).unwrap();

    let api = MockApi::default();
    let config = Config {
        funding_notional: Uint128::new(1_500_000),
        ..config()
    };
    let err = transactional(&mut storage, |store| {
        run_migration(store, &api, &config, &foo_registry())
    })
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::InsufficientTreasuryBalance {
            denom: "uosmo".to_string(),
            requested: Uint128::new(1_500_000),
            available: Uint128::new(1_000_000),
        }
    );
    assert_eq!(get_all_balances(&storage).unwrap(), balances);
    assert_eq!(next_pool_id(&storage).unwrap(), 4);
}

fn genesis_cl_pool(token0: &str, token1: &str) -> GenesisPool {
    GenesisPool::Concentrated {
        token0: token0.to_string(),
        token1: token1.to_string(),
        initial_price: Decimal256::one(),
        tick_spacing: 100,
        spread_factor: Decimal::permille(2),
        token0_amount: Uint128::new(1_000_000),
        token1_amount: Uint128::new(1_000_000),
    }
}

#[test]
fn reorients_twap_history_of_existing_concentrated_pools() {
    let now = 1_000_000;
    let dec = |n: u64| Decimal::from_ratio(n, 1u128);

    // two concentrated pools recorded base first, a balancer pool, and a concentrated pool
    // already recorded quote first
    let mut storage = MockStorage::new();
    load_genesis(
        &mut storage,
        GenesisState {
            pools: vec![
                genesis_cl_pool(AKT, "uosmo"),
                genesis_cl_pool("akash", "uosmo"),
                GenesisPool::Balancer {
                    assets: vec![
                        coin(10_000_000_000, "atom"),
                        coin(10_000_000_000, "uosmo"),
                    ],
                    swap_fee: Decimal::permille(2),
                },
                genesis_cl_pool("bar", "uosmo"),
            ],
            community_pool: vec![],
            twap_records: vec![
                record(1, now - 86_400, AKT, "uosmo", dec(10)),
                record(1, now - 36_000, AKT, "uosmo", dec(30)),
                record(1, now - 3_600, AKT, "uosmo", dec(20)),
                record(2, now - 86_400, "akash", "uosmo", dec(10)),
                record(2, now - 3_600, "akash", "uosmo", dec(20)),
                record(3, now - 3_600, "atom", "uosmo", dec(10)),
                record(3, now - 1_200, "atom", "uosmo", dec(50)),
                record(4, now - 3_600, "uosmo", "bar", Decimal::one()),
            ],
        },
    )
    .unwrap();

    let most_recent_before: Vec<_> = (1..=4)
        .map(|id| get_most_recent_records(&storage, id).unwrap())
        .collect();
    let historical_before: Vec<_> = (1..=4)
        .map(|id| get_historical_records_by_pool(&storage, id).unwrap())
        .collect();
    let by_time_before = get_historical_records_by_time(&storage).unwrap();

    let registry = AssetPairRegistry::new(vec![]).unwrap();
    let outcome = migrate_in_transaction(&mut storage, &registry).unwrap();
    assert_eq!(outcome.reoriented_pools, vec![1, 2]);
    assert!(outcome.migrated.is_empty());

    for id in 1..=4u64 {
        let most_recent = get_most_recent_records(&storage, id).unwrap();
        let historical = get_historical_records_by_pool(&storage, id).unwrap();
        let i = (id - 1) as usize;
        if id <= 2 {
            assert_eq!(
                most_recent,
                most_recent_before[i].iter().map(flip_record).collect::<Vec<_>>()
            );
            assert_eq!(
                historical,
                historical_before[i].iter().map(flip_record).collect::<Vec<_>>()
            );
            assert!(historical.iter().all(|r| r.asset0_denom == "uosmo"));
        } else {
            assert_eq!(most_recent, most_recent_before[i]);
            assert_eq!(historical, historical_before[i]);
        }
    }

    // prices swap, accumulators stay as they were
    let akt = get_historical_records_by_pool(&storage, 1).unwrap();
    assert_eq!(akt[1].asset1_denom, AKT);
    assert_eq!(akt[1].p0_last_spot_price, historical_before[0][1].p1_last_spot_price);
    assert_eq!(akt[1].p1_last_spot_price, dec(30));
    assert_eq!(
        akt[1].p0_arithmetic_twap_accumulator,
        historical_before[0][1].p0_arithmetic_twap_accumulator
    );
    assert_eq!(
        akt[1].geometric_twap_accumulator,
        historical_before[0][1].geometric_twap_accumulator
    );

    let by_time = get_historical_records_by_time(&storage).unwrap();
    assert_eq!(by_time.len(), by_time_before.len());
    for (old, new) in by_time_before.iter().zip(&by_time) {
        if old.pool_id <= 2 {
            assert_eq!(new, &flip_record(old));
        } else {
            assert_eq!(new, old);
        }
    }
}

#[test]
fn record_with_foreign_assets_aborts() {
    let mut storage = MockStorage::new();
    let cl_pool_id = seed_misoriented_cl_pool(&mut storage);
    store_new_record(
        &mut storage,
        &record(cl_pool_id, 300, "uosmo", "bar", Decimal::one()),
    )
    .unwrap();

    let registry = AssetPairRegistry::new(vec![]).unwrap();
    let err = migrate_in_transaction(&mut storage, &registry).unwrap_err();
    assert_eq!(
        err,
        ContractError::InvalidOrientation {
            asset0: "uosmo".to_string(),
            asset1: "bar".to_string(),
        }
    );
    let historical = get_historical_records_by_pool(&storage, cl_pool_id).unwrap();
    assert_eq!(historical.len(), 3);
    assert_eq!(historical[0].asset0_denom, "foo");
}

#[test]
fn proper_instantiation() {
    let mut deps = mock_dependencies();
    let env = mock_env();
    let info = mock_info("creator", &[]);

    let res = instantiate(
        deps.as_mut(),
        env.clone(),
        info.clone(),
        InstantiateMsg {
            owner: None,
            ..instantiate_msg(env.block.height)
        },
    )
    .unwrap();
    assert_eq!(
        res.attributes,
        vec![
            attr("action", "instantiate"),
            attr("owner", "creator"),
            attr("upgrade_name", "v16"),
            attr("upgrade_height", env.block.height.to_string()),
            attr("ordering", "lexicographic"),
            attr("twap_ordering", "quote_first"),
        ]
    );

    let config: Config =
        from_json(query(deps.as_ref(), env.clone(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(
        config,
        Config {
            owner: Addr::unchecked("creator"),
            upgrade_height: env.block.height,
            ..config_with_defaults()
        }
    );

    let status: MigrationState =
        from_json(query(deps.as_ref(), env.clone(), QueryMsg::MigrationStatus {}).unwrap())
            .unwrap();
    assert_eq!(status, MigrationState::Pending);

    let err = instantiate(
        mock_dependencies().as_mut(),
        env.clone(),
        info,
        InstantiateMsg {
            tick_spacing: Some(0),
            ..instantiate_msg(env.block.height)
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::PoolCreationFailed {
            reason: "tick spacing and funding notional must be positive".to_string()
        }
    );
}

fn config_with_defaults() -> Config {
    Config {
        owner: Addr::unchecked("owner"),
        upgrade_name: "v16".to_string(),
        upgrade_height: 0,
        ordering: OrderingRule::Lexicographic {},
        twap_ordering: OrderingRule::QuoteFirst {
            quote_denom: "uosmo".to_string(),
        },
        tick_spacing: 100,
        funding_notional: Uint128::new(1_000_000),
    }
}

#[test]
fn update_upgrade_plan() {
    let mut deps = mock_dependencies();
    let env = mock_env();
    instantiate(
        deps.as_mut(),
        env.clone(),
        mock_info("creator", &[]),
        instantiate_msg(env.block.height + 10),
    )
    .unwrap();

    let msg = ExecuteMsg::UpdateUpgradePlan {
        upgrade_name: None,
        upgrade_height: Some(env.block.height),
    };
    let err = execute(deps.as_mut(), env.clone(), mock_info("creator", &[]), msg.clone())
        .unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});

    execute(deps.as_mut(), env.clone(), mock_info("owner", &[]), msg.clone()).unwrap();
    let config = CONFIG.load(&deps.storage).unwrap();
    assert_eq!(config.upgrade_name, "v16");
    assert_eq!(config.upgrade_height, env.block.height);

    // nothing to migrate on a fresh chain state
    sudo(
        deps.as_mut(),
        env.clone(),
        SudoMsg::ApplyUpgrade {
            name: "v16".to_string(),
        },
    )
    .unwrap_err();
    MIGRATION_STATUS
        .save(&mut deps.storage, &MigrationState::Applied)
        .unwrap();
    let err = execute(deps.as_mut(), env, mock_info("owner", &[]), msg).unwrap_err();
    assert_eq!(err, ContractError::AlreadyApplied {});
}

#[test]
fn apply_upgrade() {
    let mut deps = mock_dependencies();
    let env = mock_env();
    instantiate(
        deps.as_mut(),
        env.clone(),
        mock_info("creator", &[]),
        instantiate_msg(env.block.height),
    )
    .unwrap();
    // one notional short for the third pair
    seed_test_chain(&mut deps.storage, 2_000_000);

    let err = sudo(
        deps.as_mut(),
        env.clone(),
        SudoMsg::ApplyUpgrade {
            name: "v15".to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::WrongUpgradeName {
            expected: "v16".to_string(),
            got: "v15".to_string()
        }
    );

    let mut late_env = env.clone();
    late_env.block.height += 1;
    let err = sudo(
        deps.as_mut(),
        late_env,
        SudoMsg::ApplyUpgrade {
            name: "v16".to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::WrongUpgradeHeight {
            expected: env.block.height,
            got: env.block.height + 1
        }
    );

    let balances = get_all_balances(&deps.storage).unwrap();
    let err = sudo(
        deps.as_mut(),
        env.clone(),
        SudoMsg::ApplyUpgrade {
            name: "v16".to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::InsufficientTreasuryBalance {
            denom: "uosmo".to_string(),
            requested: Uint128::new(1_000_000),
            available: Uint128::zero(),
        }
    );
    assert_eq!(get_all_balances(&deps.storage).unwrap(), balances);
    assert!(get_all_links(&deps.storage).unwrap().is_empty());
    assert_eq!(
        MIGRATION_STATUS.load(&deps.storage).unwrap(),
        MigrationState::Pending
    );

    fund(&mut deps.storage, &coin(1_000_000, "uosmo")).unwrap();
    let res = sudo(
        deps.as_mut(),
        env.clone(),
        SudoMsg::ApplyUpgrade {
            name: "v16".to_string(),
        },
    )
    .unwrap();
    assert_eq!(
        res.attributes,
        vec![
            attr("action", "apply_upgrade"),
            attr("upgrade_name", "v16"),
            attr("reoriented_twap_pools", ""),
            attr("links_created", "3"),
        ]
    );
    assert_eq!(res.events.len(), 3);
    assert!(res.events.iter().all(|e| e.ty == "cl_pool_created"));
    assert!(res.events[0]
        .attributes
        .contains(&attr("cl_pool_id", "4")));
    assert!(res.events[1]
        .attributes
        .contains(&attr("superfluid", "false")));

    let info: MigrationInfoResponse =
        from_json(query(deps.as_ref(), env.clone(), QueryMsg::MigrationInfo {}).unwrap())
            .unwrap();
    assert_eq!(
        info.balancer_to_concentrated_pool_links,
        vec![
            BalancerToConcentratedLink {
                balancer_pool_id: 1,
                cl_pool_id: 4
            },
            BalancerToConcentratedLink {
                balancer_pool_id: 2,
                cl_pool_id: 5
            },
            BalancerToConcentratedLink {
                balancer_pool_id: 3,
                cl_pool_id: 6
            },
        ]
    );

    let superfluid: Option<SuperfluidAsset> = from_json(
        query(
            deps.as_ref(),
            env.clone(),
            QueryMsg::SuperfluidAsset {
                denom: "cl/pool/6".to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert!(superfluid.is_some());
    let superfluid: Option<SuperfluidAsset> = from_json(
        query(
            deps.as_ref(),
            env.clone(),
            QueryMsg::SuperfluidAsset {
                denom: "cl/pool/5".to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert!(superfluid.is_none());

    let pool: Pool = from_json(
        query(deps.as_ref(), env.clone(), QueryMsg::Pool { pool_id: 5 }).unwrap(),
    )
    .unwrap();
    match pool {
        Pool::Concentrated(cl_pool) => {
            assert_eq!(cl_pool.token0, AKT);
            assert_eq!(cl_pool.token1, "uosmo");
        }
        Pool::Balancer(_) => panic!("pool 5 must be concentrated"),
    }

    let remaining: Uint128 = from_json(
        query(
            deps.as_ref(),
            env.clone(),
            QueryMsg::CommunityPoolBalance {
                denom: "uosmo".to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(remaining, Uint128::zero());

    let err = sudo(
        deps.as_mut(),
        env,
        SudoMsg::ApplyUpgrade {
            name: "v16".to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::AlreadyApplied {});
}

#[test]
fn twap_and_registry_queries() {
    let mut deps = mock_dependencies();
    let env = mock_env();
    let cl_pool_id = seed_misoriented_cl_pool(&mut deps.storage);

    let pairs: Vec<AssetPair> =
        from_json(query(deps.as_ref(), env.clone(), QueryMsg::AssetPairs {}).unwrap()).unwrap();
    assert_eq!(
        pairs
            .iter()
            .map(|p| (p.base_asset.as_str(), p.linked_classic_pool, p.superfluid))
            .collect::<Vec<_>>(),
        vec![(ATOM, 1, true), (AKT, 2, false), (USDC, 3, true)]
    );

    let most_recent: Vec<TwapRecord> = from_json(
        query(
            deps.as_ref(),
            env.clone(),
            QueryMsg::MostRecentTwaps {
                pool_id: cl_pool_id,
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(most_recent.len(), 1);
    assert_eq!(most_recent[0].time, Timestamp::from_seconds(200));

    let historical: Vec<TwapRecord> = from_json(
        query(
            deps.as_ref(),
            env.clone(),
            QueryMsg::HistoricalTwaps {
                pool_id: cl_pool_id,
            },
        )
        .unwrap(),
    )
    .unwrap();
    let by_time: Vec<TwapRecord> = from_json(
        query(deps.as_ref(), env.clone(), QueryMsg::HistoricalTwapsByTime {}).unwrap(),
    )
    .unwrap();
    assert_eq!(historical.len(), 2);
    assert_eq!(historical, by_time);

    let none: Vec<TwapRecord> = from_json(
        query(deps.as_ref(), env, QueryMsg::MostRecentTwaps { pool_id: 42 }).unwrap(),
    )
    .unwrap();
    assert!(none.is_empty());
}

#[test]
fn contract_migration() {
    let mut deps = mock_dependencies();
    let env = mock_env();
    instantiate(
        deps.as_mut(),
        env.clone(),
        mock_info("creator", &[]),
        instantiate_msg(env.block.height),
    )
    .unwrap();

    let res = migrate(deps.as_mut(), env.clone(), MigrateMsg {}).unwrap();
    assert!(res
        .attributes
        .contains(&attr("previous_contract_name", "crates.io:cl-migration")));

    set_contract_version(&mut deps.storage, "crates.io:lockdrop", "1.0.0").unwrap();
    let err = migrate(deps.as_mut(), env, MigrateMsg {}).unwrap_err();
    assert_eq!(err, ContractError::MigrationError {});
}
