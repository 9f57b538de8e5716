use crate::infer::TypeReport;

pub fn run() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(TypeReport);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_schema_names_binding_fields() {
        let schema = serde_json::to_value(schemars::schema_for!(TypeReport)).unwrap();
        let text = schema.to_string();
        for field in ["binding", "span", "confidence", "declaring_type"] {
            assert!(text.contains(field), "schema lacks {field}");
        }
    }
}
