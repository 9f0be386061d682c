//! Inclusion rules shared by the list builders

use crate::entry::CatalogEntry;
use hotset_core::{FormId, InventoryStack, MagicInfo};

/// Engine-internal magic that must never be offered
pub const DENIED_MAGIC: [FormId; 6] = [
    FormId(0x1031D3),  // Combat Heal Rate
    FormId(0x4027332), // Ahzidal's Genius
    FormId(0x403B563), // Deathbrand Instinct
    FormId(0x1711D),   // Shrouded Armor Full Set
    FormId(0x1711F),   // Nightingale Armor Full Set
    FormId(0x2012CCC), // Crossbow bonus
];

/// Check if a magic form is on the deny-list
pub fn is_denied(id: FormId) -> bool {
    DENIED_MAGIC.contains(&id)
}

/// Whether a magic entry passes the deny-list and favorites filter
pub(crate) fn accept_magic(magic: &MagicInfo, favorites_only: bool) -> bool {
    !is_denied(magic.id) && (!favorites_only || magic.favorited)
}

/// Split a stack into catalog entries.
///
/// Every enchanted or tempered instance becomes its own entry. Whatever count
/// remains after those instances collapses into one bare entry for the base
/// item. With `favorites_only`, instances need their own favorite flag and the
/// bare entry needs a favorited sub-stack not already listed.
pub(crate) fn expand_stack(stack: &InventoryStack, favorites_only: bool, out: &mut Vec<CatalogEntry>) {
    let mut distinct = 0usize;
    let mut listed = 0usize;

    for extra in stack.extras() {
        if !extra.is_distinct() {
            continue;
        }
        if !favorites_only || extra.favorited {
            let name = extra
                .display_name
                .clone()
                .unwrap_or_else(|| stack.form.name.clone());
            out.push(CatalogEntry::form(name, stack.form.id, Some(extra.handle)));
            listed += 1;
        }
        distinct += 1;
    }

    let residual = residual_count(stack, distinct);
    if residual == 0 {
        return;
    }

    let unlisted_favorites = stack.favorited_count().saturating_sub(listed);
    if !favorites_only || unlisted_favorites > 0 {
        out.push(CatalogEntry::form(stack.form.name.clone(), stack.form.id, None));
    }
}

/// Count left after distinct instances, clamped at zero
fn residual_count(stack: &InventoryStack, distinct: usize) -> usize {
    let distinct = i64::try_from(distinct).unwrap_or(i64::MAX);
    let residual = i64::from(stack.count) - distinct;
    if residual < 0 {
        log::warn!(
            "Stack {} ({}) reports {} items but {} distinct instances; treating residual as 0",
            stack.form.name,
            stack.form.id,
            stack.count,
            distinct
        );
        return 0;
    }
    usize::try_from(residual).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotset_core::{ExtraData, ExtraDataRef, FormInfo, MagicKind};

    fn sword() -> FormInfo {
        FormInfo::weapon(0x100, "Steel Sword")
    }

    #[test]
    fn test_deny_list() {
        assert!(is_denied(FormId(0x1031D3)));
        assert!(!is_denied(FormId(0x12FCD)));

        let heal = MagicInfo::new(0x1031D3, "Combat Heal Rate", MagicKind::Spell).favorited();
        assert!(!accept_magic(&heal, false));
        assert!(!accept_magic(&heal, true));
    }

    #[test]
    fn test_plain_stack_collapses() {
        let stack = InventoryStack::new(sword(), 3);
        let mut out = Vec::new();
        expand_stack(&stack, false, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].extra, None);
    }

    #[test]
    fn test_distinct_instances_split() {
        let stack = InventoryStack::new(sword(), 3)
            .with_extra(ExtraData::new(1).enchanted().with_display_name("Frostbite Blade"))
            .with_extra(ExtraData::new(2).tempered());
        let mut out = Vec::new();
        expand_stack(&stack, false, &mut out);

        let names: Vec<_> = out.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Frostbite Blade", "Steel Sword", "Steel Sword"]);
        assert_eq!(out[1].extra, Some(ExtraDataRef(2)));
        assert_eq!(out[2].extra, None);
    }

    #[test]
    fn test_all_instances_covered() {
        let stack = InventoryStack::new(sword(), 1)
            .with_extra(ExtraData::new(1).enchanted());
        let mut out = Vec::new();
        expand_stack(&stack, false, &mut out);

        assert_eq!(out.len(), 1);
        assert!(out[0].extra.is_some());
    }

    #[test]
    fn test_favorites_drop_residual() {
        let stack = InventoryStack::new(sword(), 5)
            .with_extra(ExtraData::new(1).enchanted().favorited())
            .with_extra(ExtraData::new(2).tempered().favorited());
        let mut out = Vec::new();
        expand_stack(&stack, true, &mut out);

        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|e| e.extra.is_some()));
    }

    #[test]
    fn test_favorited_plain_substack_keeps_residual() {
        let stack = InventoryStack::new(sword(), 4)
            .with_extra(ExtraData::new(1).enchanted())
            .with_extra(ExtraData::new(2).favorited());
        let mut out = Vec::new();
        expand_stack(&stack, true, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].extra, None);
    }

    #[test]
    fn test_negative_residual_clamped() {
        let stack = InventoryStack::new(sword(), 1)
            .with_extra(ExtraData::new(1).enchanted())
            .with_extra(ExtraData::new(2).tempered());
        let mut out = Vec::new();
        expand_stack(&stack, false, &mut out);

        assert_eq!(out.len(), 2);
    }
}
