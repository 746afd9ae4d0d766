// Trade evaluation.
//
// Given two teams and the players each side sends out, computes how every
// scoring category and both payrolls would move. Percentage categories are
// reported as old minus new, so a positive value means the trade hurts.

use crate::roster::categories::{RaterCategory, RaterLine, StatCategory, StatLine};
use crate::roster::model::Team;
use crate::valuation::totals::TeamDetailsData;

/// Category movement and payroll for one side of a trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSideOutcome {
    pub category_deltas: RaterLine,
    pub salary_after: i64,
}

/// Both sides of an evaluated trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeEvaluation {
    pub first: TradeSideOutcome,
    pub second: TradeSideOutcome,
}

/// Summed counting stats of the selected players.
pub fn selected_stats(team: &Team, selected: &[i64]) -> StatLine {
    let mut stats = StatLine::default();
    for player in &team.roster {
        if selected.contains(&player.id) {
            stats = stats.add(&player.detailed_stats);
        }
    }
    stats
}

/// Summed book salaries of the selected players.
pub fn selected_salaries(team: &Team, selected: &[i64]) -> i64 {
    team.roster
        .iter()
        .filter(|p| selected.contains(&p.id))
        .map(|p| p.salary)
        .sum()
}

/// Per-category movement for one team.
///
/// FG and FT compare the percentage before the trade against the percentage
/// after it; zero attempts on either side leave the delta non-finite, which
/// the caller is expected to surface as-is. Counting categories are simply
/// incoming minus outgoing.
pub fn trade_category_deltas(
    team_stats: &StatLine,
    out: &StatLine,
    incoming: &StatLine,
) -> RaterLine {
    let fgm = team_stats.get(StatCategory::Fgm);
    let fga = team_stats.get(StatCategory::Fga);
    let ftm = team_stats.get(StatCategory::Ftm);
    let fta = team_stats.get(StatCategory::Fta);

    let fg = fgm / fga
        - (fgm - out.get(StatCategory::Fgm) + incoming.get(StatCategory::Fgm))
            / (fga - out.get(StatCategory::Fga) + incoming.get(StatCategory::Fga));
    let ft = ftm / fta
        - (ftm - out.get(StatCategory::Ftm) + incoming.get(StatCategory::Ftm))
            / (fta - out.get(StatCategory::Fta) + incoming.get(StatCategory::Fta));

    let counting = |category: StatCategory| incoming.get(category) - out.get(category);

    let mut deltas = RaterLine::default();
    deltas.set(RaterCategory::Fg, fg);
    deltas.set(RaterCategory::Ft, ft);
    deltas.set(RaterCategory::ThreePm, counting(StatCategory::ThreePm));
    deltas.set(RaterCategory::Reb, counting(StatCategory::Reb));
    deltas.set(RaterCategory::Ast, counting(StatCategory::Ast));
    deltas.set(RaterCategory::Stl, counting(StatCategory::Stl));
    deltas.set(RaterCategory::Blk, counting(StatCategory::Blk));
    deltas.set(RaterCategory::Turnovers, counting(StatCategory::Turnovers));
    deltas.set(RaterCategory::Pts, counting(StatCategory::Pts));
    deltas
}

/// Evaluates a trade between two teams. Returns `None` until both sides
/// have at least one player selected.
pub fn evaluate_trade(
    first: &TeamDetailsData,
    first_players: &[i64],
    second: &TeamDetailsData,
    second_players: &[i64],
) -> Option<TradeEvaluation> {
    if first_players.is_empty() || second_players.is_empty() {
        return None;
    }

    let first_out = selected_stats(&first.team, first_players);
    let second_out = selected_stats(&second.team, second_players);
    let first_out_salaries = selected_salaries(&first.team, first_players);
    let second_out_salaries = selected_salaries(&second.team, second_players);

    Some(TradeEvaluation {
        first: TradeSideOutcome {
            category_deltas: trade_category_deltas(&first.totals.stats, &first_out, &second_out),
            salary_after: first.totals.current_salary - first_out_salaries + second_out_salaries,
        },
        second: TradeSideOutcome {
            category_deltas: trade_category_deltas(&second.totals.stats, &second_out, &first_out),
            salary_after: second.totals.current_salary - second_out_salaries + first_out_salaries,
        },
    })
}
