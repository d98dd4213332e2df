use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use schoolverse_game::{
    Catalog, CoinReward, EconomyError, Interest, InterestToggle, PlayerProfile, earn, purchase,
    toggle_interest,
};

const SEEDS: [u64; 4] = [1, 1337, 0x00C0_FFEE, 0x5C00_1DA7];

fn random_profile(rng: &mut ChaCha20Rng) -> PlayerProfile {
    let mut profile = PlayerProfile::new(rng.gen_range(0..=400));
    for item in Catalog::standard().items() {
        if rng.gen_bool(0.3) {
            profile = earn(&profile, CoinReward::DailyChallenge);
            profile = earn(&profile, CoinReward::DailyChallenge);
            profile = earn(&profile, CoinReward::DailyChallenge);
            profile = earn(&profile, CoinReward::DailyChallenge);
            profile = purchase(&profile, item).expect("topped up before buying");
        }
    }
    profile
}

#[test]
fn purchase_contract_holds_for_every_item() {
    for seed in SEEDS {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        for _ in 0..32 {
            let profile = random_profile(&mut rng);
            for item in Catalog::standard().items() {
                let result = purchase(&profile, item);
                if profile.owns(&item.id) {
                    assert!(matches!(result, Err(EconomyError::AlreadyOwned { .. })));
                } else if profile.coin_balance() < item.price {
                    assert!(matches!(
                        result,
                        Err(EconomyError::InsufficientFunds { required, available, .. })
                            if required == item.price && available == profile.coin_balance()
                    ));
                } else {
                    let next = result.expect("affordable and unowned");
                    assert_eq!(next.coin_balance(), profile.coin_balance() - item.price);
                    let mut expected = profile.owned_items().clone();
                    expected.insert(item.id.clone());
                    assert_eq!(next.owned_items(), &expected);
                    assert_eq!(next.interests(), profile.interests());
                    assert_eq!(next.appearance(), profile.appearance());
                }
            }
        }
    }
}

#[test]
fn interest_random_walk_never_exceeds_cap() {
    for seed in SEEDS {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut profile = PlayerProfile::default();
        for _ in 0..500 {
            let interest = Interest::ALL[rng.gen_range(0..Interest::ALL.len())];
            let before = profile.clone();
            match toggle_interest(&profile, interest) {
                Ok((next, InterestToggle::Added)) => {
                    assert!(!before.interests().contains(interest));
                    assert_eq!(next.interests().len(), before.interests().len() + 1);
                    profile = next;
                }
                Ok((next, InterestToggle::Removed)) => {
                    assert!(before.interests().contains(interest));
                    assert_eq!(next.interests().len(), before.interests().len() - 1);
                    profile = next;
                }
                Err(EconomyError::LimitReached { limit }) => {
                    assert_eq!(limit, 5);
                    assert_eq!(before.interests().len(), 5);
                }
                Err(other) => panic!("unexpected error {other}"),
            }
            assert!(profile.interests().len() <= 5);
            assert!(profile.validate().is_ok());
        }
    }
}

#[test]
fn toggling_any_interest_twice_restores_profile() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let mut profile = PlayerProfile::default();
    for interest in &Interest::ALL[..3] {
        profile = toggle_interest(&profile, *interest).unwrap().0;
    }
    for _ in 0..50 {
        let interest = Interest::ALL[rng.gen_range(0..Interest::ALL.len())];
        let (once, _) = toggle_interest(&profile, interest).unwrap();
        let (twice, _) = toggle_interest(&once, interest).unwrap();
        assert_eq!(twice, profile);
    }
}

#[test]
fn toggling_an_early_pick_twice_restores_profile() {
    let mut profile = PlayerProfile::default();
    for interest in [Interest::Math, Interest::Art, Interest::Music] {
        profile = toggle_interest(&profile, interest).unwrap().0;
    }
    for interest in [Interest::Math, Interest::Art] {
        let (once, how) = toggle_interest(&profile, interest).unwrap();
        assert_eq!(how, InterestToggle::Removed);
        let (twice, how) = toggle_interest(&once, interest).unwrap();
        assert_eq!(how, InterestToggle::Added);
        assert_eq!(twice, profile);
    }
}

#[test]
fn balance_only_moves_by_prices_and_rewards() {
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let catalog = Catalog::standard();
    let mut profile = PlayerProfile::new(250);
    let mut spent = 0_u32;
    let mut earned = 0_u32;
    for _ in 0..300 {
        if rng.gen_bool(0.5) {
            let reward = CoinReward::ALL[rng.gen_range(0..CoinReward::ALL.len())];
            earned += reward.coins();
            profile = earn(&profile, reward);
        } else {
            let item = &catalog.items()[rng.gen_range(0..catalog.len())];
            if let Ok(next) = purchase(&profile, item) {
                spent += item.price;
                profile = next;
            }
        }
        assert_eq!(profile.coin_balance(), 250 + earned - spent);
    }
}
