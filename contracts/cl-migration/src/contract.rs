use std::collections::BTreeMap;

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Api, Binary, Decimal256, Deps, DepsMut, Env, Event, MessageInfo, Response,
    StdResult, Storage, Uint128,
};
use cw2::{get_contract_version, set_contract_version};
use itertools::Itertools;
use migration_periphery::msg::{
    Config, ExecuteMsg, InstantiateMsg, MigrateMsg, MigrationInfoResponse, MigrationState,
    OrderingRule, QueryMsg, SudoMsg, DEFAULT_FUNDING_NOTIONAL, DEFAULT_TICK_SPACING,
};

use crate::error::ContractError;
use crate::genesis::load_genesis;
use crate::links::get_all_links;
use crate::migrator::{MigratedPair, PoolMigrator};
use crate::pools::{get_pool, next_pool_id};
use crate::registry::{AssetPairRegistry, QUOTE_ASSET};
use crate::state::{CONFIG, MIGRATION_STATUS};
use crate::superfluid::get_asset;
use crate::transaction::transactional;
use crate::treasury::get_balance;
use crate::twap::{
    get_historical_records_by_pool, get_historical_records_by_time, get_most_recent_records,
    reorient_affected_pools,
};

/// Contract name that is used for migration.
pub(crate) const CONTRACT_NAME: &str = "crates.io:cl-migration";
/// Contract version that is used for migration.
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Allowed relative drift between the balancer spot price and the concentrated pool price.
pub const PRICE_TOLERANCE_PERMILLE: u64 = 1;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };
    let config = Config {
        owner,
        upgrade_name: msg.upgrade_name,
        upgrade_height: msg.upgrade_height,
        ordering: msg.ordering.unwrap_or_default(),
        twap_ordering: msg.twap_ordering.unwrap_or_else(|| OrderingRule::QuoteFirst {
            quote_denom: QUOTE_ASSET.to_string(),
        }),
        tick_spacing: msg.tick_spacing.unwrap_or(DEFAULT_TICK_SPACING),
        funding_notional: msg
            .funding_notional
            .unwrap_or_else(|| Uint128::new(DEFAULT_FUNDING_NOTIONAL)),
    };
    if config.tick_spacing == 0 || config.funding_notional.is_zero() {
        return Err(ContractError::PoolCreationFailed {
            reason: "tick spacing and funding notional must be positive".to_string(),
        });
    }
    CONFIG.save(deps.storage, &config)?;
    MIGRATION_STATUS.save(deps.storage, &MigrationState::Pending)?;

    if let Some(genesis) = msg.genesis {
        load_genesis(deps.storage, genesis)?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("upgrade_name", config.upgrade_name)
        .add_attribute("upgrade_height", config.upgrade_height.to_string())
        .add_attribute("ordering", ordering_label(&config.ordering))
        .add_attribute("twap_ordering", ordering_label(&config.twap_ordering)))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::UpdateUpgradePlan {
            upgrade_name,
            upgrade_height,
        } => update_upgrade_plan(deps, info, upgrade_name, upgrade_height),
    }
}

fn update_upgrade_plan(
    deps: DepsMut,
    info: MessageInfo,
    upgrade_name: Option<String>,
    upgrade_height: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    if MIGRATION_STATUS.load(deps.storage)? == MigrationState::Applied {
        return Err(ContractError::AlreadyApplied {});
    }

    if let Some(upgrade_name) = upgrade_name {
        config.upgrade_name = upgrade_name;
    }
    if let Some(upgrade_height) = upgrade_height {
        config.upgrade_height = upgrade_height;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_upgrade_plan")
        .add_attribute("upgrade_name", config.upgrade_name)
        .add_attribute("upgrade_height", config.upgrade_height.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn sudo(deps: DepsMut, env: Env, msg: SudoMsg) -> Result<Response, ContractError> {
    match msg {
        SudoMsg::ApplyUpgrade { name } => apply_upgrade(deps, env, name),
    }
}

/// Runs the migration once, at the scheduled height. Either every change is written or none.
fn apply_upgrade(deps: DepsMut, env: Env, name: String) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if name != config.upgrade_name {
        return Err(ContractError::WrongUpgradeName {
            expected: config.upgrade_name,
            got: name,
        });
    }
    if env.block.height != config.upgrade_height {
        return Err(ContractError::WrongUpgradeHeight {
            expected: config.upgrade_height,
            got: env.block.height,
        });
    }
    if MIGRATION_STATUS.load(deps.storage)? == MigrationState::Applied {
        return Err(ContractError::AlreadyApplied {});
    }

    let registry = AssetPairRegistry::for_chain(&env.block.chain_id)?;
    let api = deps.api;
    let outcome = transactional(deps.storage, |storage| {
        run_migration(storage, api, &config, &registry)
    })?;
    MIGRATION_STATUS.save(deps.storage, &MigrationState::Applied)?;

    let events = outcome.migrated.iter().map(|migrated| {
        Event::new("cl_pool_created")
            .add_attribute("balancer_pool_id", migrated.balancer_pool_id.to_string())
            .add_attribute("cl_pool_id", migrated.cl_pool.id.to_string())
            .add_attribute("token0", &migrated.cl_pool.token0)
            .add_attribute("token1", &migrated.cl_pool.token1)
            .add_attribute("base_used", migrated.base_used.to_string())
            .add_attribute("quote_used", migrated.quote_used.to_string())
            .add_attribute("superfluid", migrated.superfluid_denom.is_some().to_string())
    });

    Ok(Response::new()
        .add_events(events)
        .add_attribute("action", "apply_upgrade")
        .add_attribute("upgrade_name", name)
        .add_attribute(
            "reoriented_twap_pools",
            outcome.reoriented_pools.iter().join(","),
        )
        .add_attribute("links_created", outcome.migrated.len().to_string()))
}

/// What a successful migration did.
#[derive(Clone, Debug, PartialEq)]
pub struct MigrationOutcome {
    pub reoriented_pools: Vec<u64>,
    pub migrated: Vec<MigratedPair>,
}

/// Reorients the TWAP history of the affected pools to `config.twap_ordering`, then migrates
/// every registry entry in order and checks the result. Any error aborts the whole migration;
/// the caller must make sure nothing written to `storage` survives an error.
pub fn run_migration(
    storage: &mut dyn Storage,
    api: &dyn Api,
    config: &Config,
    registry: &AssetPairRegistry,
) -> Result<MigrationOutcome, ContractError> {
    let quote_denom = registry.quote_asset();
    let balances_before = treasury_snapshot(storage, registry)?;
    let first_new_pool_id = next_pool_id(storage)?;
    let links_before = get_all_links(storage)?.len();

    let reoriented_pools = reorient_affected_pools(storage, api, &config.twap_ordering)?;

    let migrator = PoolMigrator::new(
        api,
        quote_denom,
        &config.ordering,
        config.tick_spacing,
        config.funding_notional,
    );
    let mut migrated = Vec::with_capacity(registry.len());
    for pair in registry.pairs() {
        migrated.push(migrator.migrate(storage, pair)?);
    }

    verify_postconditions(
        storage,
        registry,
        &migrated,
        &balances_before,
        first_new_pool_id,
        links_before,
    )?;

    Ok(MigrationOutcome {
        reoriented_pools,
        migrated,
    })
}

fn treasury_snapshot(
    storage: &dyn Storage,
    registry: &AssetPairRegistry,
) -> StdResult<BTreeMap<String, Uint128>> {
    registry
        .pairs()
        .iter()
        .map(|pair| pair.base_asset.as_str())
        .chain([registry.quote_asset()])
        .unique()
        .map(|denom| -> StdResult<_> { Ok((denom.to_string(), get_balance(storage, denom)?)) })
        .collect()
}

fn verify_postconditions(
    storage: &dyn Storage,
    registry: &AssetPairRegistry,
    migrated: &[MigratedPair],
    balances_before: &BTreeMap<String, Uint128>,
    first_new_pool_id: u64,
    links_before: usize,
) -> Result<(), ContractError> {
    let violated = |reason: String| ContractError::MigrationInvariant { reason };
    let tolerance = Decimal256::permille(PRICE_TOLERANCE_PERMILLE);

    for (i, m) in migrated.iter().enumerate() {
        let expected_id = first_new_pool_id + i as u64;
        if m.cl_pool.id != expected_id {
            return Err(violated(format!(
                "pool {} was created with id {} instead of {}",
                m.balancer_pool_id, m.cl_pool.id, expected_id
            )));
        }

        let expected = m.expected_cl_price()?;
        let actual = m.cl_pool.current_price()?;
        if !within_multiplicative_tolerance(expected, actual, tolerance)? {
            return Err(violated(format!(
                "price {} of pool {} drifted from balancer price {}",
                actual, m.cl_pool.id, expected
            )));
        }
    }

    let mut used: BTreeMap<String, Uint128> = BTreeMap::new();
    for coin in migrated.iter().flat_map(|m| [&m.base_used, &m.quote_used]) {
        let total = used.entry(coin.denom.clone()).or_default();
        *total = total.checked_add(coin.amount)?;
    }
    for (denom, before) in balances_before {
        let after = get_balance(storage, denom)?;
        let spent = used.get(denom).copied().unwrap_or_default();
        if before.checked_sub(after)? != spent {
            return Err(violated(format!(
                "community pool {} decreased from {} to {} while {} was used",
                denom, before, after, spent
            )));
        }
    }

    let links = get_all_links(storage)?;
    let created = &links[links_before.min(links.len())..];
    let linked_as_expected = created.len() == registry.len()
        && created
            .iter()
            .zip(registry.pairs())
            .all(|(link, pair)| link.balancer_pool_id == pair.linked_classic_pool);
    if !linked_as_expected {
        return Err(violated(format!(
            "{} links created for {} asset pairs",
            created.len(),
            registry.len()
        )));
    }

    Ok(())
}

/// |expected - actual| <= expected * tolerance
pub fn within_multiplicative_tolerance(
    expected: Decimal256,
    actual: Decimal256,
    tolerance: Decimal256,
) -> StdResult<bool> {
    let diff = if expected > actual {
        expected - actual
    } else {
        actual - expected
    };
    Ok(diff <= expected.checked_mul(tolerance)?)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Config {} => Ok(to_json_binary(&CONFIG.load(deps.storage)?)?),
        QueryMsg::MigrationStatus {} => Ok(to_json_binary(&MIGRATION_STATUS.load(deps.storage)?)?),
        QueryMsg::AssetPairs {} => {
            let registry = AssetPairRegistry::for_chain(&env.block.chain_id)?;
            Ok(to_json_binary(&registry.pairs().to_vec())?)
        }
        QueryMsg::MigrationInfo {} => Ok(to_json_binary(&MigrationInfoResponse {
            balancer_to_concentrated_pool_links: get_all_links(deps.storage)?,
        })?),
        QueryMsg::Pool { pool_id } => Ok(to_json_binary(&get_pool(deps.storage, pool_id)?)?),
        QueryMsg::MostRecentTwaps { pool_id } => Ok(to_json_binary(&get_most_recent_records(
            deps.storage,
            pool_id,
        )?)?),
        QueryMsg::HistoricalTwaps { pool_id } => Ok(to_json_binary(
            &get_historical_records_by_pool(deps.storage, pool_id)?,
        )?),
        QueryMsg::HistoricalTwapsByTime {} => Ok(to_json_binary(
            &get_historical_records_by_time(deps.storage)?,
        )?),
        QueryMsg::CommunityPoolBalance { denom } => {
            Ok(to_json_binary(&get_balance(deps.storage, &denom)?)?)
        }
        QueryMsg::SuperfluidAsset { denom } => {
            Ok(to_json_binary(&get_asset(deps.storage, &denom)?)?)
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let contract_version = get_contract_version(deps.storage)?;
    if contract_version.contract != CONTRACT_NAME {
        return Err(ContractError::MigrationError {});
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("previous_contract_name", &contract_version.contract)
        .add_attribute("previous_contract_version", &contract_version.version)
        .add_attribute("new_contract_name", CONTRACT_NAME)
        .add_attribute("new_contract_version", CONTRACT_VERSION))
}

fn ordering_label(rule: &OrderingRule) -> &'static str {
    match rule {
        OrderingRule::Lexicographic {} => "lexicographic",
        OrderingRule::QuoteLast { .. } => "quote_last",
        OrderingRule::QuoteFirst { .. } => "quote_first",
    }
}
