//! Table and label formatting for the HTML report.

use crate::domain::analysis::{Analysis, SkippedOrder};
use crate::domain::evaluator::Evaluation;

fn fmt(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Leverage reads as a multiplier, "20x" rather than "20.00".
pub fn format_leverage(leverage: f64) -> String {
    if leverage.fract() == 0.0 {
        format!("{leverage:.0}x")
    } else {
        format!("{leverage}x")
    }
}

pub fn render_account_summary(analysis: &Analysis, decimals: usize) -> String {
    let mut output = String::new();
    output.push_str("<table class=\"account\">\n");
    output.push_str(&format!(
        "  <tr><th>Capital</th><td>{}</td></tr>\n",
        fmt(analysis.capital, decimals)
    ));
    output.push_str(&format!(
        "  <tr><th>Leverage</th><td>{}</td></tr>\n",
        format_leverage(analysis.leverage)
    ));
    output.push_str(&format!(
        "  <tr><th>Orders evaluated</th><td>{}</td></tr>\n",
        analysis.evaluations.len()
    ));
    output.push_str(&format!(
        "  <tr><th>Orders skipped</th><td>{}</td></tr>\n",
        analysis.skipped.len()
    ));
    output.push_str("</table>\n");
    output
}

pub fn render_results_table(evaluations: &[Evaluation], decimals: usize) -> String {
    if evaluations.is_empty() {
        return "<p>No orders were evaluated.</p>\n".to_string();
    }

    let mut output = String::new();
    output.push_str("<table class=\"results\">\n");
    output.push_str("  <tr><th>#</th><th>Direction</th><th>Entry</th><th>Take Profit</th>");
    output.push_str("<th>Stop Loss</th><th>P/L Ratio</th><th>Potential Profit</th>");
    output.push_str("<th>Potential Loss</th><th>Take Profit %</th><th>Stop Loss %</th>");
    output.push_str("<th>Margin</th><th>Position Value</th><th>Leverage</th>");
    output.push_str("<th>Win Rate</th><th>Expected Value</th></tr>\n");

    for (i, eval) in evaluations.iter().enumerate() {
        let ev_class = if eval.expected_value >= 0.0 { "pos" } else { "neg" };
        output.push_str(&format!(
            "  <tr><td>{num}</td><td class=\"{dir}\">{dir}</td><td>{entry}</td>\
             <td>{tp}</td><td>{sl}</td><td>{ratio}</td><td>{profit}</td><td>{loss}</td>\
             <td>{tp_pct}</td><td>{sl_pct}</td><td>{margin}</td><td>{value}</td>\
             <td>{lev}</td><td>{wr}</td><td class=\"{ev_class}\">{ev}</td></tr>\n",
            num = i + 1,
            dir = eval.direction,
            entry = fmt(eval.entry_price, decimals),
            tp = fmt(eval.take_profit, decimals),
            sl = fmt(eval.stop_loss, decimals),
            ratio = fmt(eval.profit_loss_ratio, decimals),
            profit = fmt(eval.potential_profit, decimals),
            loss = fmt(eval.potential_loss, decimals),
            tp_pct = fmt(eval.take_profit_pct, decimals),
            sl_pct = fmt(eval.stop_loss_pct, decimals),
            margin = fmt(eval.capital, decimals),
            value = fmt(eval.position_value, decimals),
            lev = fmt(eval.leverage, decimals),
            wr = fmt(eval.win_rate, decimals),
            ev = fmt(eval.expected_value, decimals),
        ));
    }

    output.push_str("</table>\n");
    output
}

pub fn render_skipped_list(skipped: &[SkippedOrder]) -> String {
    if skipped.is_empty() {
        return String::new();
    }

    let mut output = String::from("<ul class=\"skipped\">\n");
    for skip in skipped {
        output.push_str(&format!(
            "  <li>order {num}: {dir} @ {entry} ({reason})</li>\n",
            num = skip.index + 1,
            dir = skip.direction,
            entry = skip.entry_price,
            reason = skip.reason,
        ));
    }
    output.push_str("</ul>\n");
    output
}

/// Hover text for an order marker, one field per line.
pub fn hover_text(eval: &Evaluation, number: usize, decimals: usize) -> String {
    format!(
        "Order {number} ({dir})\n\
         entry: {entry}\n\
         take profit: {tp}\n\
         stop loss: {sl}\n\
         win rate: {wr}%\n\
         P/L ratio: {ratio}\n\
         expected value: {ev}\n\
         potential profit: {profit}\n\
         potential loss: {loss}\n\
         take profit: {tp_pct}%\n\
         stop loss: {sl_pct}%\n\
         margin: {margin}\n\
         position value: {value}\n\
         leverage: {lev}",
        dir = eval.direction,
        entry = fmt(eval.entry_price, decimals),
        tp = fmt(eval.take_profit, decimals),
        sl = fmt(eval.stop_loss, decimals),
        wr = fmt(eval.win_rate * 100.0, decimals),
        ratio = fmt(eval.profit_loss_ratio, decimals),
        ev = fmt(eval.expected_value, decimals),
        profit = fmt(eval.potential_profit, decimals),
        loss = fmt(eval.potential_loss, decimals),
        tp_pct = fmt(eval.take_profit_pct, decimals),
        sl_pct = fmt(eval.stop_loss_pct, decimals),
        margin = fmt(eval.capital, decimals),
        value = fmt(eval.position_value, decimals),
        lev = format_leverage(eval.leverage),
    )
}
