use std::convert::Infallible;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use warp::reply::Json;
use warp::Filter;

use crate::refresh::Dashboard;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectRequest {
    pub name: String,
}

pub struct RestApi {
    dashboard: Arc<Dashboard>,
}

impl RestApi {
    pub fn new(dashboard: Arc<Dashboard>) -> Self {
        RestApi { dashboard }
    }

    pub fn routes(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        self.get_dashboard()
            .or(self.post_select())
            .or(self.get_trends())
    }

    fn get_dashboard(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let dashboard = Arc::clone(&self.dashboard);

        warp::path!("vitals" / "dashboard")
            .and(warp::get())
            .and_then(move || {
                let dashboard = Arc::clone(&dashboard);
                async move {
                    let snapshot = dashboard.snapshot();
                    let response = ApiResponse {
                        status: "success".to_string(),
                        message: "Current dashboard snapshot".to_string(),
                        data: Some(serde_json::to_value(&snapshot).unwrap()),
                    };
                    Ok::<Json, Infallible>(warp::reply::json(&response))
                }
            })
    }

    fn post_select(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let dashboard = Arc::clone(&self.dashboard);

        warp::path!("vitals" / "select")
            .and(warp::post())
            .and(warp::body::json())
            .and_then(move |request: SelectRequest| {
                let dashboard = Arc::clone(&dashboard);
                async move {
                    let snapshot = dashboard.select_patient(&request.name);
                    let response = ApiResponse {
                        status: "success".to_string(),
                        message: format!("Selected patient {}", request.name),
                        data: Some(serde_json::to_value(&snapshot).unwrap()),
                    };
                    Ok::<Json, Infallible>(warp::reply::json(&response))
                }
            })
    }

    fn get_trends(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let dashboard = Arc::clone(&self.dashboard);

        warp::path!("vitals" / "trends" / String)
            .and(warp::get())
            .and_then(move |name: String| {
                let dashboard = Arc::clone(&dashboard);
                async move {
                    let trends = dashboard.patient_trends(&name);
                    let response = ApiResponse {
                        status: "success".to_string(),
                        message: format!("Trend series for {}", name),
                        data: Some(serde_json::to_value(&trends).unwrap()),
                    };
                    Ok::<Json, Infallible>(warp::reply::json(&response))
                }
            })
    }
}
