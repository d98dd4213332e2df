use anyhow::{Result, anyhow, bail, ensure};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::sync::Arc;

use schoolverse_game::{
    AppearanceField, Catalog, CoinReward, EconomyConfig, EconomyError, Feature, FeatureStatus,
    HairColor, Interest, ItemCategory, NoticeKind, SchoolSession, ShirtColor, SkinTone,
};

type Check = fn(u64) -> Result<()>;

/// A named check the tester can run against the economy.
#[derive(Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    check: Check,
}

impl Scenario {
    const fn new(key: &'static str, description: &'static str, check: Check) -> Self {
        Self {
            key,
            description,
            check,
        }
    }

    /// Run the scenario for one seed.
    ///
    /// # Errors
    ///
    /// Returns the first failed expectation.
    pub fn run(&self, seed: u64) -> Result<()> {
        (self.check)(seed)
    }
}

const SCENARIOS: &[Scenario] = &[
    Scenario::new(
        "starting-profile",
        "Fresh sessions start with the configured balance and nothing owned",
        starting_profile,
    ),
    Scenario::new(
        "purchase-flow",
        "Buy a decoration, then fail to buy it again",
        purchase_flow,
    ),
    Scenario::new(
        "insufficient-funds",
        "Purchases above the balance are rejected without side effects",
        insufficient_funds,
    ),
    Scenario::new(
        "interest-cap",
        "Five interests at most; swapping one out frees a slot",
        interest_cap,
    ),
    Scenario::new(
        "appearance-palette",
        "Every palette entry is accepted and unknown colors are rejected",
        appearance_palette,
    ),
    Scenario::new(
        "decorations",
        "Only owned decorations can be equipped",
        decorations,
    ),
    Scenario::new("rewards", "Coin rewards credit fixed amounts", rewards),
    Scenario::new(
        "placeholder-features",
        "Unimplemented menu entries report unavailable without blocking",
        placeholder_features,
    ),
    Scenario::new(
        "random-walk",
        "Seeded random actions never break profile invariants",
        random_walk,
    ),
];

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.description))
}

pub fn get_scenario(key: &str) -> Option<Scenario> {
    SCENARIOS.iter().copied().find(|s| s.key == key)
}

pub fn all_keys() -> Vec<String> {
    SCENARIOS.iter().map(|s| s.key.to_string()).collect()
}

fn session(coins: u32) -> SchoolSession {
    SchoolSession::new(
        Arc::new(Catalog::standard().clone()),
        &EconomyConfig {
            starting_coins: coins,
        },
    )
}

fn starting_profile(_seed: u64) -> Result<()> {
    let s = SchoolSession::new(
        Arc::new(Catalog::standard().clone()),
        &EconomyConfig::default(),
    );
    let profile = s.profile();
    ensure!(profile.coin_balance() == 250, "default balance should be 250");
    ensure!(profile.owned_items().is_empty(), "nothing owned at start");
    ensure!(profile.interests().is_empty(), "no interests at start");
    ensure!(
        profile.selected_decoration().is_none(),
        "no decoration at start"
    );
    Ok(())
}

fn purchase_flow(_seed: u64) -> Result<()> {
    let mut s = session(250);
    s.purchase("crown")?;
    ensure!(
        s.profile().coin_balance() == 150,
        "balance after crown should be 150, got {}",
        s.profile().coin_balance()
    );
    ensure!(s.profile().owns("crown"), "crown should be owned");
    match s.purchase("crown") {
        Err(EconomyError::AlreadyOwned { .. }) => {}
        other => return Err(anyhow!("expected AlreadyOwned, got {other:?}")),
    }
    ensure!(s.profile().coin_balance() == 150, "re-buy must not charge");
    Ok(())
}

fn insufficient_funds(_seed: u64) -> Result<()> {
    let mut s = session(40);
    match s.purchase("cap") {
        Err(EconomyError::InsufficientFunds {
            required: 50,
            available: 40,
            ..
        }) => {}
        other => return Err(anyhow!("expected InsufficientFunds, got {other:?}")),
    }
    ensure!(s.profile().coin_balance() == 40, "balance must stay at 40");
    ensure!(!s.profile().owns("cap"), "cap must not be granted");
    Ok(())
}

fn interest_cap(_seed: u64) -> Result<()> {
    let mut s = session(0);
    for interest in &Interest::ALL[..5] {
        s.toggle_interest(*interest)?;
    }
    let before = s.profile().interests().clone();
    match s.toggle_interest(Interest::Robotics) {
        Err(EconomyError::LimitReached { limit: 5 }) => {}
        other => return Err(anyhow!("expected LimitReached, got {other:?}")),
    }
    ensure!(s.profile().interests() == &before, "full set must not change");
    s.toggle_interest(Interest::ALL[0])?;
    s.toggle_interest(Interest::Robotics)?;
    ensure!(s.profile().interests().len() == 5, "swap keeps five interests");
    ensure!(
        s.profile().interests().contains(Interest::Robotics),
        "robotics should be selected after swap"
    );
    Ok(())
}

fn appearance_palette(_seed: u64) -> Result<()> {
    let mut s = session(0);
    for hair in HairColor::ALL {
        s.select_appearance_named(AppearanceField::Hair, hair.key())?;
        ensure!(s.profile().appearance().hair == *hair, "hair {hair} not applied");
    }
    for shirt in ShirtColor::ALL {
        s.select_appearance_named(AppearanceField::Shirt, shirt.key())?;
        ensure!(s.profile().appearance().shirt == *shirt, "shirt {shirt} not applied");
    }
    for skin in SkinTone::ALL {
        s.select_appearance_named(AppearanceField::Skin, skin.key())?;
        ensure!(s.profile().appearance().skin == *skin, "skin {skin} not applied");
    }
    let before = s.profile().appearance();
    ensure!(
        s.select_appearance_named(AppearanceField::Hair, "white").is_err(),
        "white is not a hair color"
    );
    ensure!(s.profile().appearance() == before, "rejected pick must not apply");
    Ok(())
}

fn decorations(_seed: u64) -> Result<()> {
    let mut s = session(250);
    ensure!(
        s.toggle_decoration("trophy").is_err(),
        "unowned decoration must not equip"
    );
    s.purchase("trophy")?;
    s.toggle_decoration("trophy")?;
    ensure!(
        s.profile().selected_decoration() == Some("trophy"),
        "trophy should be equipped"
    );
    s.toggle_decoration("trophy")?;
    ensure!(
        s.profile().selected_decoration().is_none(),
        "second toggle should unequip"
    );
    Ok(())
}

fn rewards(_seed: u64) -> Result<()> {
    let mut s = session(0);
    let mut expected = 0;
    for reward in CoinReward::ALL {
        expected += reward.coins();
        let balance = s.earn(reward);
        ensure!(balance == expected, "{reward:?} credited {balance}, expected {expected}");
    }
    ensure!(expected == 100, "reward table changed: total {expected}");
    Ok(())
}

fn placeholder_features(_seed: u64) -> Result<()> {
    let mut s = session(0);
    for feature in Feature::ALL {
        ensure!(
            s.open_feature(feature) == FeatureStatus::Unavailable,
            "{feature:?} should be unavailable"
        );
    }
    let notices = s.drain_notices();
    ensure!(notices.len() == Feature::ALL.len(), "one notice per feature");
    ensure!(
        notices.iter().all(|n| n.kind == NoticeKind::Info),
        "placeholder notices are informational"
    );
    Ok(())
}

fn random_walk(seed: u64) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let start = rng.gen_range(0..=300);
    let mut s = session(start);
    let items: Vec<String> = s
        .catalog()
        .by_category(None)
        .map(|item| item.id.clone())
        .collect();
    let mut expected = i64::from(start);

    for step in 0..200 {
        match rng.gen_range(0..5) {
            0 => {
                let reward = CoinReward::ALL[rng.gen_range(0..CoinReward::ALL.len())];
                s.earn(reward);
                expected += i64::from(reward.coins());
            }
            1 | 2 => {
                let id = &items[rng.gen_range(0..items.len())];
                let price = s.catalog().find_item(id).map_or(0, |item| item.price);
                match s.purchase(id) {
                    Ok(()) => expected -= i64::from(price),
                    Err(
                        EconomyError::AlreadyOwned { .. }
                        | EconomyError::InsufficientFunds { .. },
                    ) => {}
                    Err(err) => bail!("step {step}: buying {id} failed: {err}"),
                }
            }
            3 => {
                let interest = Interest::ALL[rng.gen_range(0..Interest::ALL.len())];
                let was_full = s.profile().interests().is_full();
                match s.toggle_interest(interest) {
                    Ok(_) => {}
                    Err(EconomyError::LimitReached { .. }) if was_full => {}
                    Err(err) => bail!("step {step}: toggling {interest} failed: {err}"),
                }
            }
            _ => {
                let shelf = ItemCategory::ALL[rng.gen_range(0..ItemCategory::ALL.len())];
                let owned: Vec<String> = s
                    .shop(Some(shelf))
                    .iter()
                    .filter(|entry| s.profile().owns(&entry.item.id))
                    .map(|entry| entry.item.id.clone())
                    .collect();
                if let Some(id) = owned.first() {
                    s.toggle_decoration(id)?;
                }
            }
        }

        let profile = s.profile();
        ensure!(
            i64::from(profile.coin_balance()) == expected,
            "step {step}: balance {} but ledger says {expected}",
            profile.coin_balance()
        );
        profile
            .validate()
            .map_err(|err| anyhow!("step {step}: {err}"))?;
        log::trace!("step {step}: balance {}", profile.coin_balance());
    }
    Ok(())
}
