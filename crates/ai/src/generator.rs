use std::sync::Arc;

use serde::Serialize;
use validator::Validate;

use crate::{
    GeneratedMealPlan, GeneratedRecipe, MealPlanRequest, RecipeRequest, TextGenerator, fallback,
    meal_plan_prompt, parse_meal_plan, parse_recipe, recipe_prompt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Ai,
    Fallback,
}

/// A generated value and where it came from
#[derive(Debug, Clone, Serialize)]
pub struct Generated<T> {
    pub value: T,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl<T> Generated<T> {
    fn ai(value: T) -> Self {
        Self {
            value,
            source: Source::Ai,
            warning: None,
        }
    }

    fn fallback(value: T, warning: String) -> Self {
        Self {
            value,
            source: Source::Fallback,
            warning: Some(warning),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == Source::Fallback
    }
}

/// Asks the text generator once and falls back on any failure
#[derive(Clone)]
pub struct Generator {
    client: Arc<dyn TextGenerator>,
}

impl Generator {
    pub fn new(client: Arc<dyn TextGenerator>) -> Self {
        Self { client }
    }

    pub async fn recipe(
        &self,
        request: &RecipeRequest,
    ) -> mealplanner_shared::Result<Generated<GeneratedRecipe>> {
        request.validate()?;

        let outcome = match self.client.generate(&recipe_prompt(request)).await {
            Ok(text) => parse_recipe(&text).map_err(|rejection| rejection.to_string()),
            Err(err) => Err(err.to_string()),
        };

        Ok(match outcome {
            Ok(recipe) => {
                tracing::info!(title = %recipe.title, "AI recipe generated");

                Generated::ai(recipe)
            }
            Err(reason) => {
                tracing::warn!(reason = %reason, "AI recipe rejected, using fallback");

                Generated::fallback(fallback::recipe(), reason)
            }
        })
    }

    pub async fn meal_plan(
        &self,
        request: &MealPlanRequest,
    ) -> mealplanner_shared::Result<Generated<GeneratedMealPlan>> {
        request.validate()?;

        let outcome = match self.client.generate(&meal_plan_prompt(request)).await {
            Ok(text) => parse_meal_plan(&text, request).map_err(|rejection| rejection.to_string()),
            Err(err) => Err(err.to_string()),
        };

        Ok(match outcome {
            Ok(plan) => {
                tracing::info!(days = plan.days.len(), "AI meal plan generated");

                Generated::ai(plan)
            }
            Err(reason) => {
                tracing::warn!(reason = %reason, "AI meal plan rejected, using fallback");

                Generated::fallback(fallback::meal_plan(request), reason)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use mealplanner_shared::{DayOfWeek, Error, MealType};

    use super::*;
    use crate::ClientError;

    struct Scripted {
        answer: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(answer: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                answer: answer.map(ToOwned::to_owned),
                prompts: Mutex::new(vec![]),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, prompt: &str) -> Result<String, ClientError> {
            self.prompts.lock().unwrap().push(prompt.to_owned());

            self.answer.clone().ok_or(ClientError::NotConfigured)
        }
    }

    fn request() -> MealPlanRequest {
        let mut request = MealPlanRequest::new(NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        request.days = 1;
        request.meal_types = vec![MealType::Dinner];
        request
    }

    #[tokio::test]
    async fn test_valid_answer_is_used() {
        let client = Scripted::new(Some(
            r#"```json
{"days":[{"day":"monday","meals":[{"meal_type":"dinner","name":"Ramen","description":"","ingredients":[],"calories":null}]}]}
```"#,
        ));
        let generator = Generator::new(client.clone());

        let generated = generator.meal_plan(&request()).await.unwrap();
        assert_eq!(generated.source, Source::Ai);
        assert!(generated.warning.is_none());
        assert_eq!(generated.value.days[0].meals[0].name, "Ramen");
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_rejected_answer_falls_back_once() {
        let client = Scripted::new(Some(r#"{"days":[{"day":"monday","meals":[],}]}"#));
        let generator = Generator::new(client.clone());

        let generated = generator.meal_plan(&request()).await.unwrap();
        assert!(generated.is_fallback());
        assert!(generated.warning.unwrap().starts_with("invalid JSON"));
        assert_eq!(generated.value.days.len(), 1);
        assert_eq!(generated.value.days[0].day, DayOfWeek::Monday);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_client_failure_falls_back() {
        let client = Scripted::new(None);
        let generator = Generator::new(client.clone());

        let generated = generator.recipe(&RecipeRequest::default()).await.unwrap();
        assert!(generated.is_fallback());
        assert_eq!(
            generated.warning.as_deref(),
            Some("AI generation is not configured")
        );
        assert_eq!(generated.value, fallback::recipe());
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_request_is_not_sent() {
        let client = Scripted::new(None);
        let generator = Generator::new(client.clone());

        let mut request = request();
        request.days = 0;

        assert!(matches!(
            generator.meal_plan(&request).await,
            Err(Error::Validate(_))
        ));
        assert_eq!(client.calls(), 0);
    }
}
