//! Built-in tools: arithmetic, mock weather lookup, and mock web search.
//!
//! The weather and search tools answer from fixed tables so the CLI works
//! without extra API keys. Lookup misses come back as textual results, never
//! as faults, so the model always receives something it can reason about.

use super::Tool;
use crate::error::{Result, SnakkError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// All built-in tools, ready for registration.
pub fn builtin_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(AddTool),
        Arc::new(MultiplyTool),
        Arc::new(DivideTool),
        Arc::new(WeatherTool),
        Arc::new(WebSearchTool),
    ]
}

/// Schema shared by the two-operand arithmetic tools.
fn binary_number_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "a": {
                "type": "number",
                "description": "First number"
            },
            "b": {
                "type": "number",
                "description": "Second number"
            }
        },
        "required": ["a", "b"]
    })
}

fn number_arg(args: &Value, field: &str, tool: &str) -> Result<f64> {
    args[field]
        .as_f64()
        .ok_or_else(|| SnakkError::InvalidArguments {
            tool: tool.to_string(),
            reason: format!("missing numeric field '{}'", field),
        })
}

/// Format a result without a trailing ".0" for whole numbers.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Adds two numbers.
pub struct AddTool;

#[async_trait]
impl Tool for AddTool {
    fn name(&self) -> &str {
        "add"
    }

    fn description(&self) -> &str {
        "Add two numbers"
    }

    fn parameters(&self) -> Value {
        binary_number_schema()
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let a = number_arg(&args, "a", self.name())?;
        let b = number_arg(&args, "b", self.name())?;
        Ok(format_number(a + b))
    }
}

/// Multiplies two numbers.
pub struct MultiplyTool;

#[async_trait]
impl Tool for MultiplyTool {
    fn name(&self) -> &str {
        "multiply"
    }

    fn description(&self) -> &str {
        "Multiply two numbers"
    }

    fn parameters(&self) -> Value {
        binary_number_schema()
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let a = number_arg(&args, "a", self.name())?;
        let b = number_arg(&args, "b", self.name())?;
        Ok(format_number(a * b))
    }
}

/// Divides two numbers. Division by zero is a tool failure.
pub struct DivideTool;

#[async_trait]
impl Tool for DivideTool {
    fn name(&self) -> &str {
        "divide"
    }

    fn description(&self) -> &str {
        "Divide the first number by the second"
    }

    fn parameters(&self) -> Value {
        binary_number_schema()
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let a = number_arg(&args, "a", self.name())?;
        let b = number_arg(&args, "b", self.name())?;

        if b == 0.0 {
            return Err(SnakkError::ToolFailed {
                tool: self.name().to_string(),
                message: "division by zero".to_string(),
            });
        }

        Ok(format_number(a / b))
    }
}

/// Mock weather lookup for a fixed set of cities.
pub struct WeatherTool;

impl WeatherTool {
    /// (city, temperature °C, condition, humidity %, wind km/h)
    const CITIES: [(&'static str, i32, &'static str, u32, u32); 6] = [
        ("new york", 22, "Sunny", 65, 15),
        ("london", 15, "Rainy", 80, 20),
        ("tokyo", 18, "Cloudy", 70, 10),
        ("beijing", 20, "Clear", 55, 12),
        ("paris", 17, "Partly Cloudy", 68, 18),
        ("sydney", 25, "Sunny", 60, 22),
    ];
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get the current weather for a city"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name, e.g. 'London'"
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let city = args["city"]
            .as_str()
            .ok_or_else(|| SnakkError::InvalidArguments {
                tool: self.name().to_string(),
                reason: "missing string field 'city'".to_string(),
            })?;

        let key = city.to_lowercase();
        match Self::CITIES.iter().find(|(name, ..)| *name == key) {
            Some((_, temp, condition, humidity, wind)) => Ok(format!(
                "Weather in {}:\n- Temperature: {}°C\n- Condition: {}\n- Humidity: {}%\n- Wind Speed: {} km/h",
                city, temp, condition, humidity, wind
            )),
            None => {
                let available = Self::CITIES
                    .iter()
                    .map(|(name, ..)| *name)
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(format!(
                    "Weather data not available for {}. Available cities: {}",
                    city, available
                ))
            }
        }
    }
}

/// Mock web search answering from a fixed result table.
pub struct WebSearchTool;

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Searches the web for information. Use this when you need current information or facts."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let query = args["query"]
            .as_str()
            .ok_or_else(|| SnakkError::InvalidArguments {
                tool: self.name().to_string(),
                reason: "missing string field 'query'".to_string(),
            })?;

        let results = match query.to_lowercase().as_str() {
            "latest ai advancements" => vec![
                "GPT-4 and large language models continue to improve".to_string(),
                "AI agents are becoming more autonomous".to_string(),
                "Multimodal AI models can process text, images, and video".to_string(),
            ],
            "weather" => vec!["Current weather data from various locations".to_string()],
            _ => vec![format!("Search results for: {}", query)],
        };

        Ok(serde_json::to_string_pretty(&results)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add() {
        let result = AddTool.execute(json!({"a": 3, "b": 4})).await.unwrap();
        assert_eq!(result, "7");
    }

    #[tokio::test]
    async fn test_multiply_fractional() {
        let result = MultiplyTool.execute(json!({"a": 2.5, "b": 2})).await.unwrap();
        assert_eq!(result, "5");

        let result = MultiplyTool.execute(json!({"a": 2.5, "b": 3})).await.unwrap();
        assert_eq!(result, "7.5");
    }

    #[tokio::test]
    async fn test_divide_by_zero_fails() {
        let err = DivideTool.execute(json!({"a": 1, "b": 0})).await.unwrap_err();
        assert!(matches!(err, SnakkError::ToolFailed { .. }));
    }

    #[tokio::test]
    async fn test_weather_known_city() {
        let result = WeatherTool
            .execute(json!({"city": "London"}))
            .await
            .unwrap();
        assert!(result.contains("Rainy"));
    }

    #[tokio::test]
    async fn test_weather_unknown_city_is_not_an_error() {
        let result = WeatherTool.execute(json!({"city": "Oslo"})).await.unwrap();
        assert!(result.contains("not available"));
    }

    #[tokio::test]
    async fn test_web_search_default_results() {
        let result = WebSearchTool
            .execute(json!({"query": "rust agents"}))
            .await
            .unwrap();
        assert!(result.contains("Search results for: rust agents"));
    }
}
