use log::debug;
use rand::Rng;

use crate::error::OutcomeError;
use crate::wheel_config::WheelItem;

/// Which item a spin landed on
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    pub index: usize,
    pub item: &'a WheelItem,
    /// True when the admin override picked the item
    pub forced: bool,
}

/// Picks the winning item.
///
/// `draw` is a unit value in `[0, 1)`; out of range values are clamped. A
/// matching `override_id` always wins whatever the draw. An override that
/// names no current item is ignored.
pub fn resolve<'a>(
    items: &'a [WheelItem],
    override_id: Option<&str>,
    draw: f64,
) -> Result<Resolution<'a>, OutcomeError> {
    if items.is_empty() {
        return Err(OutcomeError::EmptyWheel);
    }

    if let Some(id) = override_id {
        if let Some(index) = items.iter().position(|item| item.id == id) {
            return Ok(Resolution { index, item: &items[index], forced: true });
        }
        debug!("Override {} matches no wheel item, drawing at random", id);
    }

    let index = pick_index(items, clamp_draw(draw));
    Ok(Resolution { index, item: &items[index], forced: false })
}

pub fn resolve_with_rng<'a, R: Rng + ?Sized>(
    items: &'a [WheelItem],
    override_id: Option<&str>,
    rng: &mut R,
) -> Result<Resolution<'a>, OutcomeError> {
    let draw = rng.gen_range(0.0..1.0);
    resolve(items, override_id, draw)
}

fn clamp_draw(draw: f64) -> f64 {
    if draw.is_nan() || draw < 0.0 {
        0.0
    } else if draw >= 1.0 {
        // largest f64 below 1.0
        1.0 - f64::EPSILON / 2.0
    } else {
        draw
    }
}

fn pick_index(items: &[WheelItem], draw: f64) -> usize {
    let weighted = items.iter().any(|item| item.weight.is_some());
    if weighted {
        let mut weights: Vec<f64> = items.iter().map(effective_weight).collect();
        let mut total: f64 = weights.iter().sum();
        if total.is_infinite() {
            // each weight is finite, so scaling by the largest keeps the odds
            let largest = weights.iter().cloned().fold(0.0, f64::max);
            weights.iter_mut().for_each(|w| *w /= largest);
            total = weights.iter().sum();
        }
        if total > 0.0 {
            return weighted_index(&weights, draw * total);
        }
    }
    uniform_index(items.len(), draw)
}

fn effective_weight(item: &WheelItem) -> f64 {
    match item.weight {
        None => 1.0,
        Some(w) if w.is_finite() && w > 0.0 => w,
        Some(_) => 0.0,
    }
}

fn uniform_index(len: usize, draw: f64) -> usize {
    ((draw * len as f64).floor() as usize).min(len - 1)
}

// Linear scan over cumulative ranges; the item whose range holds `target` wins
fn weighted_index(weights: &[f64], target: f64) -> usize {
    let mut cumulative = 0.0;
    let mut last_drawable = 0;
    for (i, weight) in weights.iter().enumerate() {
        if *weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last_drawable = i;
        if target < cumulative {
            return i;
        }
    }
    // float rounding can leave target == total
    last_drawable
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn items() -> Vec<WheelItem> {
        vec![
            WheelItem::new("a", "10% Off"),
            WheelItem::new("b", "Free Session"),
            WheelItem::new("c", "Protein Shake"),
            WheelItem::new("d", "Club Merch"),
        ]
    }

    const DRAWS: [f64; 7] = [0.0, 0.1, 0.25, 0.5, 0.74, 0.99, 0.999_999];

    #[test]
    fn test_empty_wheel_fails() {
        assert_eq!(resolve(&[], None, 0.5), Err(OutcomeError::EmptyWheel));
        assert_eq!(resolve(&[], Some("a"), 0.5), Err(OutcomeError::EmptyWheel));
    }

    #[test]
    fn test_random_path_returns_member_and_is_deterministic() {
        let items = items();
        for draw in DRAWS {
            let first = resolve(&items, None, draw).unwrap();
            let second = resolve(&items, None, draw).unwrap();
            assert!(items.contains(first.item));
            assert_eq!(first, second);
            assert!(!first.forced);
        }
    }

    #[test]
    fn test_uniform_draw_maps_to_slices() {
        let items = items();
        assert_eq!(resolve(&items, None, 0.0).unwrap().item.id, "a");
        assert_eq!(resolve(&items, None, 0.3).unwrap().item.id, "b");
        assert_eq!(resolve(&items, None, 0.6).unwrap().item.id, "c");
        assert_eq!(resolve(&items, None, 0.99).unwrap().item.id, "d");
    }

    #[test]
    fn test_override_always_wins() {
        let items = items();
        for draw in DRAWS {
            let resolution = resolve(&items, Some("c"), draw).unwrap();
            assert_eq!(resolution.item.id, "c");
            assert_eq!(resolution.index, 2);
            assert!(resolution.forced);
        }
    }

    #[test]
    fn test_dangling_override_falls_back() {
        let items = items();
        let resolution = resolve(&items, Some("zzz"), 0.3).unwrap();
        assert_eq!(resolution.item.id, "b");
        assert!(!resolution.forced);
    }

    #[test]
    fn test_out_of_range_draws_are_clamped() {
        let items = items();
        assert_eq!(resolve(&items, None, -4.0).unwrap().item.id, "a");
        assert_eq!(resolve(&items, None, f64::NAN).unwrap().item.id, "a");
        assert_eq!(resolve(&items, None, 1.0).unwrap().item.id, "d");
        assert_eq!(resolve(&items, None, 17.0).unwrap().item.id, "d");
    }

    #[test]
    fn test_weighted_selection_uses_cumulative_ranges() {
        // total weight 10: a=[0,1) b=[1,1) c=[1,7) d=[7,10)
        let items = vec![
            WheelItem::new("a", "A").with_weight(1.0),
            WheelItem::new("b", "B").with_weight(0.0),
            WheelItem::new("c", "C").with_weight(6.0),
            WheelItem::new("d", "D").with_weight(3.0),
        ];
        assert_eq!(resolve(&items, None, 0.05).unwrap().item.id, "a");
        assert_eq!(resolve(&items, None, 0.15).unwrap().item.id, "c");
        assert_eq!(resolve(&items, None, 0.69).unwrap().item.id, "c");
        assert_eq!(resolve(&items, None, 0.75).unwrap().item.id, "d");
        assert_eq!(resolve(&items, None, 1.0).unwrap().item.id, "d");
        for draw in DRAWS {
            assert_ne!(resolve(&items, None, draw).unwrap().item.id, "b");
        }
    }

    #[test]
    fn test_missing_weight_counts_as_one() {
        let items = vec![
            WheelItem::new("a", "A").with_weight(3.0),
            WheelItem::new("b", "B"),
        ];
        assert_eq!(resolve(&items, None, 0.74).unwrap().item.id, "a");
        assert_eq!(resolve(&items, None, 0.76).unwrap().item.id, "b");
    }

    #[test]
    fn test_all_zero_weights_fall_back_to_uniform() {
        let items = vec![
            WheelItem::new("a", "A").with_weight(0.0),
            WheelItem::new("b", "B").with_weight(0.0),
        ];
        assert_eq!(resolve(&items, None, 0.2).unwrap().item.id, "a");
        assert_eq!(resolve(&items, None, 0.8).unwrap().item.id, "b");
    }

    #[test]
    fn test_huge_weights_keep_their_odds() {
        let items = vec![
            WheelItem::new("a", "A").with_weight(1e308),
            WheelItem::new("b", "B").with_weight(1e308),
            WheelItem::new("c", "C").with_weight(0.0),
        ];
        assert_eq!(resolve(&items, None, 0.0).unwrap().item.id, "a");
        assert_eq!(resolve(&items, None, 0.4).unwrap().item.id, "a");
        assert_eq!(resolve(&items, None, 0.6).unwrap().item.id, "b");
        for draw in DRAWS {
            assert_ne!(resolve(&items, None, draw).unwrap().item.id, "c");
        }
    }

    #[test]
    fn test_resolve_with_rng_respects_override() {
        let items = items();
        let mut rng = StepRng::new(0, 1 << 40);
        for _ in 0..10 {
            assert_eq!(resolve_with_rng(&items, Some("d"), &mut rng).unwrap().item.id, "d");
            assert!(items.contains(resolve_with_rng(&items, None, &mut rng).unwrap().item));
        }
    }
}
