use crate::expr::PlanExpr;
use crate::physical_plan::PhysicalPlan;

/// Render a physical plan as human-readable multiline text.
pub fn explain_physical(plan: &PhysicalPlan) -> String {
    let mut s = String::new();
    fmt_plan(plan, 0, &mut s);
    s
}

fn fmt_plan(plan: &PhysicalPlan, indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    match plan {
        PhysicalPlan::SeqScan(x) => {
            out.push_str(&format!(
                "{pad}SeqScan table={} db={} ns={} for_update={}\n",
                x.table_oid(),
                x.database_oid(),
                x.namespace_oid(),
                x.is_for_update()
            ));
            out.push_str(&format!(
                "{pad}  columns={:?}\n",
                x.column_oids().iter().map(|c| c.0).collect::<Vec<_>>()
            ));
            if let Some(p) = x.predicate() {
                out.push_str(&format!("{pad}  predicate={}\n", fmt_expr(p)));
            }
        }
        PhysicalPlan::IndexScan(x) => {
            out.push_str(&format!(
                "{pad}IndexScan index={} table={} db={} ns={} for_update={}\n",
                x.index_oid(),
                x.table_oid(),
                x.database_oid(),
                x.namespace_oid(),
                x.is_for_update()
            ));
            out.push_str(&format!(
                "{pad}  columns={:?}\n",
                x.column_oids().iter().map(|c| c.0).collect::<Vec<_>>()
            ));
            if let Some(p) = x.predicate() {
                out.push_str(&format!("{pad}  predicate={}\n", fmt_expr(p)));
            }
        }
        PhysicalPlan::Limit(x) => {
            out.push_str(&format!("{pad}Limit n={} offset={}\n", x.limit(), x.offset()));
        }
        PhysicalPlan::HashJoin(x) => {
            out.push_str(&format!(
                "{pad}HashJoin type={:?} build={:?}\n",
                x.join_type(),
                x.build_side()
            ));
            for (l, r) in x.left_keys().iter().zip(x.right_keys()) {
                out.push_str(&format!("{pad}  on {} = {}\n", fmt_expr(l), fmt_expr(r)));
            }
        }
    }
    for child in plan.children() {
        fmt_plan(child, indent + 1, out);
    }
}

fn fmt_expr(e: &PlanExpr) -> String {
    match e {
        PlanExpr::ColumnRef { column } => format!("col#{column}"),
        PlanExpr::Literal(v) => format!("{v:?}"),
        PlanExpr::BinaryOp { left, op, right } => {
            format!("({}) {:?} ({})", fmt_expr(left), op, fmt_expr(right))
        }
        PlanExpr::And(a, b) => format!("({}) AND ({})", fmt_expr(a), fmt_expr(b)),
        PlanExpr::Or(a, b) => format!("({}) OR ({})", fmt_expr(a), fmt_expr(b)),
        PlanExpr::Not(x) => format!("NOT ({})", fmt_expr(x)),
        PlanExpr::Cast { expr, to_type } => format!("cast({} as {to_type:?})", fmt_expr(expr)),
    }
}
