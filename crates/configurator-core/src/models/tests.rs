#[cfg(test)]
mod model_tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use crate::{
        error::ConfiguratorError,
        models::{
            AnswerValue, Answers, Condition, ConfiguratorDefinition, InputKind, LocalizedText,
            Measurement, NumberRange, Operator, Pattern, Step, StepOption, StepRecord,
            SubmissionStatus, Visibility, MORE_CUSTOMIZATION_FIELD,
        },
    };

    fn radio_step(order: u32, field: &str, values: &[&str]) -> Step {
        Step {
            order,
            field_name: field.to_string(),
            title: LocalizedText::from(field),
            description: None,
            required: true,
            visibility: None,
            kind: InputKind::Radio {
                options: values
                    .iter()
                    .map(|value| StepOption::new(*value, *value))
                    .collect(),
            },
        }
    }

    fn definition(steps: Vec<Step>) -> ConfiguratorDefinition {
        ConfiguratorDefinition {
            slug: "veranda".to_string(),
            name: "Veranda".to_string(),
            description: None,
            steps,
        }
    }

    fn assert_invalid_schema(result: crate::Result<()>, fragment: &str) {
        match result {
            Err(ConfiguratorError::InvalidSchema { reason }) => {
                assert!(reason.contains(fragment), "unexpected reason: {reason}")
            }
            other => panic!("expected InvalidSchema, got {other:?}"),
        }
    }

    #[test]
    fn test_definition_parses_all_input_kinds() {
        let json = json!({
            "slug": "garden-room",
            "name": "Garden room",
            "steps": [
                {"order": 1, "fieldName": "style", "inputType": "radioImage", "required": true,
                 "options": [{"value": "modern", "label": {"en": "Modern"}, "imageUrl": "/img/modern.jpg"}]},
                {"order": 2, "fieldName": "roof", "inputType": "radio",
                 "options": [{"value": "glass", "label": {"en": "Glass"}}]},
                {"order": 3, "fieldName": "extras", "inputType": "checkbox", "maxSelections": 2,
                 "options": [{"value": "heater", "label": {"en": "Heater"}}]},
                {"order": 4, "fieldName": "postcode", "inputType": "text",
                 "validationPattern": "^[0-9]{4}"},
                {"order": 5, "fieldName": "width", "inputType": "number",
                 "minValue": 100, "maxValue": 1000, "stepValue": 10},
                {"order": 6, "fieldName": "frame", "inputType": "select",
                 "options": [{"value": "alu", "label": {"en": "Aluminium"}}]},
                {"order": 7, "fieldName": "remarks", "inputType": "textarea"},
                {"order": 8, "fieldName": "height", "inputType": "dimension", "unit": "cm",
                 "minValue": 200},
                {"order": 9, "fieldName": "size", "inputType": "dimensions",
                 "measurements": [{"key": "width", "minValue": 100}, {"key": "depth"}],
                 "visibilityCondition": [{"field": "roof", "operator": "equals", "value": "glass"}]}
            ]
        });

        let definition: ConfiguratorDefinition =
            serde_json::from_value(json).expect("Failed to parse definition");
        definition.validate().expect("Definition should be valid");

        let kinds: Vec<&str> = definition.steps.iter().map(|s| s.input_type()).collect();
        assert_eq!(
            kinds,
            vec![
                "radioImage", "radio", "checkbox", "text", "number", "select", "textarea",
                "dimension", "dimensions"
            ]
        );
        assert!(!definition.steps[1].required);
        assert!(definition.steps[0].options()[0].active);
        assert_eq!(
            definition.steps[4].kind.range(),
            Some(NumberRange {
                min_value: Some(100.0),
                max_value: Some(1000.0),
                step_value: Some(10.0),
            })
        );
        match &definition.steps[8].visibility {
            Some(Visibility::All(conditions)) => {
                assert_eq!(conditions[0].operator, Operator::Equals)
            }
            other => panic!("unexpected visibility {other:?}"),
        }
    }

    #[test]
    fn test_single_condition_and_unknown_operator_parse() {
        let step: Step = serde_json::from_value(json!({
            "order": 1,
            "fieldName": "lighting",
            "inputType": "textarea",
            "visibilityCondition": {"field": "color", "operator": "startsWith", "value": "b"}
        }))
        .expect("Failed to parse step");

        match step.visibility {
            Some(Visibility::Single(condition)) => {
                assert_eq!(condition.operator, Operator::Unsupported)
            }
            other => panic!("unexpected visibility {other:?}"),
        }
    }

    #[test]
    fn test_invalid_pattern_is_rejected_on_parse() {
        let result = serde_json::from_value::<Step>(json!({
            "order": 1,
            "fieldName": "postcode",
            "inputType": "text",
            "validationPattern": "([0-9"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_fields() {
        let def = definition(vec![
            radio_step(1, "color", &["black"]),
            radio_step(2, "color", &["white"]),
        ]);
        assert_invalid_schema(def.validate(), "more than one step");
    }

    #[test]
    fn test_validate_rejects_reserved_field() {
        let def = definition(vec![radio_step(1, MORE_CUSTOMIZATION_FIELD, &["yes"])]);
        assert_invalid_schema(def.validate(), "reserved");
    }

    #[test]
    fn test_validate_rejects_non_increasing_order() {
        let def = definition(vec![
            radio_step(2, "color", &["black"]),
            radio_step(2, "roof", &["glass"]),
        ]);
        assert_invalid_schema(def.validate(), "not greater");
    }

    #[test]
    fn test_validate_rejects_required_step_after_optional() {
        let mut lighting = radio_step(2, "lighting", &["led"]);
        lighting.required = false;
        let def = definition(vec![
            radio_step(1, "color", &["black"]),
            lighting,
            radio_step(3, "roof", &["glass"]),
        ]);
        assert_invalid_schema(
            def.validate(),
            "required step 'roof' comes after optional step 'lighting'",
        );
    }

    #[test]
    fn test_validate_rejects_unknown_condition_field() {
        let mut lighting = radio_step(2, "lighting", &["led"]);
        lighting.visibility = Some(Condition::new("colour", Operator::Equals, "black").into());
        let def = definition(vec![radio_step(1, "color", &["black"]), lighting]);
        assert_invalid_schema(def.validate(), "unknown field 'colour'");
    }

    #[test]
    fn test_validate_accepts_gateway_condition() {
        let mut lighting = radio_step(2, "lighting", &["led"]);
        lighting.visibility =
            Some(Condition::new(MORE_CUSTOMIZATION_FIELD, Operator::Equals, true).into());
        let def = definition(vec![radio_step(1, "color", &["black"]), lighting]);
        assert!(def.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_choice_without_active_options() {
        let mut step = radio_step(1, "color", &["black"]);
        if let InputKind::Radio { options } = &mut step.kind {
            options[0].active = false;
        }
        assert_invalid_schema(definition(vec![step]).validate(), "no active options");
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let step = Step {
            kind: InputKind::Number {
                min_value: Some(10.0),
                max_value: Some(5.0),
                step_value: None,
            },
            ..radio_step(1, "width", &[])
        };
        assert_invalid_schema(definition(vec![step]).validate(), "above its maximum");
    }

    #[test]
    fn test_validate_rejects_bad_slug() {
        let mut def = definition(vec![radio_step(1, "color", &["black"])]);
        def.slug = "Veranda Deluxe".to_string();
        assert!(matches!(
            def.validate(),
            Err(ConfiguratorError::InvalidInput { ref field, .. }) if field == "slug"
        ));
    }

    #[test]
    fn test_step_record_round_trip() {
        let steps = vec![
            Step {
                kind: InputKind::Text {
                    pattern: Some(Pattern::new("^[A-Z]").unwrap()),
                },
                ..radio_step(1, "name", &[])
            },
            Step {
                kind: InputKind::Dimensions {
                    measurements: vec![Measurement {
                        key: "width".to_string(),
                        label: LocalizedText::from("Width"),
                        range: NumberRange::new(Some(100.0), Some(700.0)),
                        unit: Some("cm".to_string()),
                    }],
                },
                ..radio_step(2, "size", &[])
            },
            Step {
                kind: InputKind::Checkbox {
                    options: vec![StepOption::new("led", "LED")],
                    min_selections: Some(1),
                    max_selections: None,
                },
                ..radio_step(3, "extras", &[])
            },
        ];

        for step in steps {
            let record = StepRecord::from(&step);
            assert_eq!(record.input_type, step.input_type());
            let restored = Step::try_from(record).expect("Failed to convert record");
            assert_eq!(restored, step);
        }
    }

    #[test]
    fn test_step_record_rejects_unknown_type() {
        let record = StepRecord {
            field_name: "color".to_string(),
            input_type: "slider".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            Step::try_from(record),
            Err(ConfiguratorError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_answers_serialize_flat_with_whole_numbers() {
        let mut answers = Answers::new();
        answers.set("color", "black");
        answers.set("width", 500.0);
        answers.set("depth", 2.5);
        answers.set(
            "size",
            BTreeMap::from([("width".to_string(), 300.0), ("depth".to_string(), 250.0)]),
        );
        answers.set_more_customization(true);

        let value = serde_json::to_value(&answers).expect("Failed to serialize");
        assert_eq!(
            value,
            json!({
                "_more_customization": true,
                "color": "black",
                "depth": 2.5,
                "size": {"depth": 250, "width": 300},
                "width": 500
            })
        );
    }

    #[test]
    fn test_answers_deserialize_drops_nulls() {
        let answers: Answers = serde_json::from_value(json!({
            "color": "black",
            "width": 500,
            "extras": ["led", "heater"],
            "lighting": null,
            "_more_customization": false
        }))
        .expect("Failed to parse answers");

        assert_eq!(answers.get("color"), Some(&AnswerValue::Text("black".into())));
        assert_eq!(answers.get("width"), Some(&AnswerValue::Number(500.0)));
        assert_eq!(answers.get("extras").map(|v| v.choices()), Some(vec!["led", "heater"]));
        assert!(!answers.contains("lighting"));
        assert_eq!(answers.more_customization(), Some(false));
        assert_eq!(answers.fields().count(), 3);
    }

    #[test]
    fn test_retain_fields_keeps_gateway_flag() {
        let mut answers: Answers = [("color", "black"), ("lighting", "led")].into_iter().collect();
        answers.set_more_customization(false);

        let kept = answers.retain_fields(["color"]);
        assert!(kept.contains("color"));
        assert!(!kept.contains("lighting"));
        assert_eq!(kept.more_customization(), Some(false));
    }

    #[test]
    fn test_submission_status_parsing() {
        assert_eq!("new".parse::<SubmissionStatus>(), Ok(SubmissionStatus::New));
        assert_eq!("Quoted".parse::<SubmissionStatus>(), Ok(SubmissionStatus::Quoted));
        assert!("archived".parse::<SubmissionStatus>().is_err());
        assert_eq!(SubmissionStatus::Contacted.as_str(), "contacted");
    }

    #[test]
    fn test_blank_values() {
        assert!(AnswerValue::Text(String::new()).is_blank());
        assert!(AnswerValue::Choices(Vec::new()).is_blank());
        assert!(!AnswerValue::Number(0.0).is_blank());
        assert!(!AnswerValue::Flag(false).is_blank());
        assert_eq!(AnswerValue::Text(" 42 ".into()).as_number(), Some(42.0));
        assert_eq!(AnswerValue::Text("abc".into()).as_number(), None);
    }
}
