use varix_core::model::Ruleset;
use varix_core::validate::is_rule_complete;

/// Render one ruleset as the read-only rules table: rule number, the
/// measurement condition, the finding it maps to, and the action.
pub fn print_ruleset(ruleset: &Ruleset) {
    println!("=== {} ===\n", ruleset.name);

    if ruleset.rules.is_empty() {
        println!("  (no rules)");
        println!();
        return;
    }

    let conditions: Vec<String> = ruleset.rules.iter().map(|r| r.condition_text()).collect();

    let cond_width = conditions
        .iter()
        .map(|c| c.len())
        .max()
        .unwrap_or(20)
        .max("MEASUREMENT CONDITION".len());
    let finding_width = ruleset
        .rules
        .iter()
        .map(|r| r.finding_name.len())
        .max()
        .unwrap_or(12)
        .max("FINDING ITEM".len());

    println!(
        "  {:<8}{:<cond$}  {:<find$}  ACTION",
        "RULE #",
        "MEASUREMENT CONDITION",
        "FINDING ITEM",
        cond = cond_width,
        find = finding_width
    );
    println!("  {}", "-".repeat(8 + cond_width + finding_width + 12));

    for (idx, rule) in ruleset.rules.iter().enumerate() {
        let action = rule
            .action
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        let incomplete_marker = if is_rule_complete(rule) { "" } else { " (!)" };
        println!(
            "  {:<8}{:<cond$}  {:<find$}  {}{}",
            idx + 1,
            conditions[idx],
            rule.finding_name,
            action,
            incomplete_marker,
            cond = cond_width,
            find = finding_width
        );
    }
    println!();
}
