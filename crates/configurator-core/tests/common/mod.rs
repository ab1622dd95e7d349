#![allow(dead_code)]

use configurator_core::{
    ConfiguratorDefinition, ConfiguratorSchema, ConfiguratorService, ConfiguratorServiceBuilder,
    ImportConfigurator,
};
use serde_json::json;
use tempfile::TempDir;

/// Helper function to create a test service
pub async fn create_test_service() -> (TempDir, ConfiguratorService) {
    create_test_service_with_webhook(None).await
}

pub async fn create_test_service_with_webhook(
    webhook_url: Option<String>,
) -> (TempDir, ConfiguratorService) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let service = ConfiguratorServiceBuilder::new()
        .with_database_path(Some(&db_path))
        .with_webhook_url(webhook_url)
        .build()
        .await
        .expect("Failed to create service");
    (temp_dir, service)
}

/// color (radio, required), width (number 100-1000, required) and lighting
/// (radio, optional)
pub fn veranda_definition() -> ConfiguratorDefinition {
    serde_json::from_value(json!({
        "slug": "veranda",
        "name": "Veranda",
        "description": "Aluminium veranda with glass roof",
        "steps": [
            {"order": 1, "fieldName": "color", "inputType": "radio", "required": true,
             "title": {"en": "Colour", "nl": "Kleur"},
             "options": [
                {"value": "anthracite", "label": {"en": "Anthracite"}},
                {"value": "black", "label": {"en": "Black", "nl": "Zwart"}, "displayOrder": 1},
                {"value": "white", "label": {"en": "White"}, "displayOrder": 2}
             ]},
            {"order": 2, "fieldName": "width", "inputType": "number", "required": true,
             "title": {"en": "Width (cm)"}, "minValue": 100, "maxValue": 1000},
            {"order": 3, "fieldName": "lighting", "inputType": "radio",
             "title": {"en": "Lighting"},
             "options": [
                {"value": "none", "label": {"en": "No lighting"}},
                {"value": "led", "label": {"en": "LED strip"}, "displayOrder": 1},
                {"value": "spots", "label": {"en": "Spots"}, "displayOrder": 2}
             ]}
        ]
    }))
    .expect("Failed to parse veranda definition")
}

/// One step of every input kind, with conditions and inactive options.
pub fn garden_room_definition() -> ConfiguratorDefinition {
    serde_json::from_value(json!({
        "slug": "garden-room",
        "name": "Garden room",
        "steps": [
            {"order": 10, "fieldName": "style", "inputType": "radioImage", "required": true,
             "title": {"en": "Style"},
             "options": [
                {"value": "modern", "label": {"en": "Modern"}, "imageUrl": "/img/modern.jpg"},
                {"value": "classic", "label": {"en": "Classic"}, "active": false}
             ]},
            {"order": 20, "fieldName": "frame", "inputType": "select", "required": true,
             "title": {"en": "Frame"},
             "options": [{"value": "alu", "label": {"en": "Aluminium"}}]},
            {"order": 30, "fieldName": "size", "inputType": "dimensions", "required": true,
             "title": {"en": "Size"},
             "measurements": [
                {"key": "width", "label": {"en": "Width"}, "minValue": 200, "maxValue": 700, "unit": "cm"},
                {"key": "depth", "label": {"en": "Depth"}, "minValue": 150, "maxValue": 400, "unit": "cm"}
             ]},
            {"order": 40, "fieldName": "height", "inputType": "dimension", "required": true,
             "title": {"en": "Height"}, "minValue": 200, "maxValue": 300, "stepValue": 5, "unit": "cm"},
            {"order": 50, "fieldName": "extras", "inputType": "checkbox",
             "title": {"en": "Extras"}, "minSelections": 1, "maxSelections": 2,
             "options": [
                {"value": "heater", "label": {"en": "Heater"}},
                {"value": "screen", "label": {"en": "Screen"}, "displayOrder": 1}
             ]},
            {"order": 60, "fieldName": "postcode", "inputType": "text",
             "title": {"en": "Postcode"}, "validationPattern": "^[0-9]{4} ?[A-Z]{2}$"},
            {"order": 70, "fieldName": "remarks", "inputType": "textarea",
             "title": {"en": "Remarks"},
             "visibilityCondition": {"field": "frame", "operator": "notEquals", "value": "wood"}},
            {"order": 80, "fieldName": "insulation", "inputType": "number",
             "title": {"en": "Insulation (mm)"}, "minValue": 50,
             "visibilityCondition": [
                {"field": "height", "operator": "greaterThan", "value": 250},
                {"field": "extras", "operator": "contains", "value": "heater"}
             ]}
        ]
    }))
    .expect("Failed to parse garden room definition")
}

pub async fn import(
    service: &ConfiguratorService,
    definition: ConfiguratorDefinition,
) -> ConfiguratorSchema {
    service
        .import_configurator(&ImportConfigurator {
            definition,
            replace: false,
        })
        .await
        .expect("Failed to import configurator")
}
