use labpack_core::cas;
use labpack_core::classify::form_code::form_rule_catalog;
use labpack_core::error::LabpackError;
use labpack_core::RegulatoryIndex;

pub fn list() -> Result<(), LabpackError> {
    let index = RegulatoryIndex::builtin()?;
    let (p, u, d, props) = index.counts();
    println!("Embedded regulatory tables: {p} P codes, {u} U codes, {d} D codes, {props} chemical property records\n");

    println!("P codes (acutely hazardous discarded chemical products):");
    let mut p_rows: Vec<_> = index.iter_p().collect();
    p_rows.sort_by(|(_, a), (_, b)| a.code.cmp(&b.code));
    for (cas, entry) in p_rows {
        println!("  {}  {:<12}  {}", entry.code, cas, entry.chemical_name);
    }

    println!("\nU codes (toxic discarded chemical products):");
    let mut u_rows: Vec<_> = index.iter_u().collect();
    u_rows.sort_by(|(_, a), (_, b)| a.code.cmp(&b.code));
    for (cas, entry) in u_rows {
        println!("  {}  {:<12}  {}", entry.code, cas, entry.chemical_name);
    }

    println!("\nD codes (toxicity characteristic, TCLP):");
    let mut d_rows: Vec<_> = index.iter_d().collect();
    d_rows.sort_by(|(_, a), (_, b)| a.code.cmp(&b.code));
    for (cas, entry) in d_rows {
        println!(
            "  {}  {:<12}  {:<24}  {} {}",
            entry.code, cas, entry.constituent_name, entry.tclp_threshold, entry.units
        );
    }

    Ok(())
}

pub fn lookup(raw_cas: &str) -> Result<(), LabpackError> {
    let Some(cas) = cas::normalize(raw_cas) else {
        return Err(LabpackError::InvalidMaterial(format!(
            "'{raw_cas}' is not a valid CAS number"
        )));
    };
    let index = RegulatoryIndex::builtin()?;

    println!("CAS {cas}:");
    let mut found = false;

    if let Some(entry) = index.p_code(&cas) {
        found = true;
        println!(
            "  {}  {} ({}) [{}]",
            entry.code, entry.chemical_name, entry.hazard_reason, entry.citation
        );
    }
    if let Some(entry) = index.u_code(&cas) {
        found = true;
        println!(
            "  {}  {} ({}) [{}]",
            entry.code, entry.chemical_name, entry.reason, entry.citation
        );
    }
    if let Some(entry) = index.d_code(&cas) {
        found = true;
        println!(
            "  {}  {} (TCLP >= {} {}, {}) [{}]",
            entry.code,
            entry.constituent_name,
            entry.tclp_threshold,
            entry.units,
            entry.method,
            entry.citation
        );
    }
    if let Some(props) = index.chemical_properties(&cas) {
        found = true;
        print!("  properties: {}", props.name);
        if let Some(fp) = props.flash_point_celsius {
            print!(", flash point {fp} C");
        }
        if props.ignitable {
            print!(", ignitable");
        }
        if props.corrosive {
            print!(", corrosive");
        }
        if props.oxidizer {
            print!(", oxidizer");
        }
        println!();
    }

    if !found {
        return Err(LabpackError::UnknownCode(format!("CAS {cas}")));
    }

    Ok(())
}

pub fn forms() -> Result<(), LabpackError> {
    println!("Form-code rules, evaluated top to bottom (first match wins):\n");
    for (code, description) in form_rule_catalog() {
        println!("  {code}  {description}");
    }
    Ok(())
}
