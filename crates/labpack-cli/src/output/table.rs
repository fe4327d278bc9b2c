use labpack_core::classify::outcome::{ClassificationSource, MaterialClassification};
use labpack_core::compat::types::GroupCompatibilityReport;

pub fn print_classifications(classifications: &[MaterialClassification]) {
    for (i, c) in classifications.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {} ===\n", c.product_name);

        let codes: Vec<&str> = c.waste_codes.iter().map(String::as_str).collect();
        if codes.is_empty() {
            println!("  Waste codes: none");
        } else {
            println!("  Waste codes: {}", codes.join(", "));
        }
        println!("  Form code:   {} ({})", c.form_code, c.form_code_description);
        println!("  Full code:   {}", c.full_waste_code);
        if !c.state_codes.is_empty() {
            println!("  State codes: {}", c.state_codes.join(", "));
        }
        println!("  Confidence:  {:.2}", c.confidence);
        match &c.source {
            ClassificationSource::Engine => {}
            ClassificationSource::Cache { score, matched_key } => {
                println!("  Source:      database match '{matched_key}' (score {score:.2})");
            }
        }

        for chem in &c.chemicals {
            let cas = chem.cas.as_deref().unwrap_or("-");
            if chem.assignments.is_empty() {
                println!("  {:<30} {:<12} no federal codes", chem.name, cas);
            } else {
                for a in &chem.assignments {
                    println!(
                        "  {:<30} {:<12} {}  {} [{}]",
                        chem.name, cas, a.code, a.basis, a.citation
                    );
                }
            }
        }
        for unknown in &c.unknown_chemicals {
            let cas = unknown.cas.as_deref().unwrap_or("-");
            println!("  {:<30} {:<12} unknown: {}", unknown.name, cas, unknown.reason);
        }
    }
}

pub fn print_group(report: &GroupCompatibilityReport) {
    println!(
        "Overall: {}\n",
        if report.overall_compatible {
            "compatible"
        } else {
            "NOT compatible"
        }
    );

    for verdict in &report.pairwise {
        let r = &verdict.report;
        println!(
            "  {} + {}  ->  {} (risk: {})",
            verdict.material_a,
            verdict.material_b,
            if r.compatible { "ok" } else { "SEGREGATE" },
            r.risk_level
        );
        for issue in &r.issues {
            println!("      issue: {issue}");
        }
        for rec in &r.recommendations {
            println!("      note:  {rec}");
        }
    }

    if !report.unresolved.is_empty() {
        println!("\nUnresolved (need --resolve NAME=TYPE):");
        for name in &report.unresolved {
            println!("  {name}");
        }
    }
}
