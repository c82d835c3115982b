use std::{path::PathBuf, sync::Arc};

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use yard_index::Entry;

use crate::{
    manager::Manager,
    recycle::{BinState, VirtualBin},
};

use super::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualBinSummary {
    pub id: usize,
    pub name: String,
    pub state: BinState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualBinDetail {
    pub id: usize,
    pub name: String,
    pub state: BinState,
    pub entry_count: usize,
    pub physical_bin_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalBinResponse {
    pub id: usize,
    pub name: String,
    pub path: PathBuf,
    pub state: BinState,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EntriesQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct FindQuery {
    pub path: PathBuf,
}

pub async fn list_virtual_bins(State(manager): State<Arc<Manager>>) -> Json<Vec<VirtualBinSummary>> {
    let bins = manager
        .virtual_bins()
        .iter()
        .map(|bin| VirtualBinSummary {
            id: bin.id,
            name: bin.name.clone(),
            state: bin.state(),
        })
        .collect();

    Json(bins)
}

pub async fn get_virtual_bin(
    State(manager): State<Arc<Manager>>,
    id: Result<Path<usize>, PathRejection>,
) -> Result<Json<VirtualBinDetail>, ApiError> {
    let Path(id) = id?;
    let bin = get_bin(&manager, id)?;
    let entry_count = bin.index().read().await.len();

    Ok(Json(VirtualBinDetail {
        id: bin.id,
        name: bin.name.clone(),
        state: bin.state(),
        entry_count,
        physical_bin_count: bin.physical_bins().len(),
    }))
}

pub async fn list_physical_bins(
    State(manager): State<Arc<Manager>>,
    id: Result<Path<usize>, PathRejection>,
) -> Result<Json<Vec<PhysicalBinResponse>>, ApiError> {
    let Path(id) = id?;
    let bin = get_bin(&manager, id)?;
    let index = bin.index().read().await;

    let bins = bin
        .physical_bins()
        .iter()
        .map(|physical| PhysicalBinResponse {
            id: physical.id,
            name: physical.name.clone(),
            path: physical.path.clone(),
            state: physical.state(),
            entries: index
                .bin_entries(physical.id)
                .map(|entry| entry.as_ref().clone())
                .collect(),
        })
        .collect();

    Ok(Json(bins))
}

pub async fn list_entries(
    State(manager): State<Arc<Manager>>,
    id: Result<Path<usize>, PathRejection>,
    query: Result<Query<EntriesQuery>, QueryRejection>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    let Path(id) = id?;
    let Query(query) = query?;

    if query.limit == Some(0) {
        return Err(ApiError::bad_request("limit must be greater than zero"));
    }

    let bin = get_bin(&manager, id)?;
    let index = bin.index().read().await;

    let entries = index
        .by_date()
        .skip(query.offset.unwrap_or(0))
        .take(query.limit.unwrap_or(usize::MAX))
        .map(|entry| entry.as_ref().clone())
        .collect();

    Ok(Json(entries))
}

pub async fn find_entry(
    State(manager): State<Arc<Manager>>,
    id: Result<Path<usize>, PathRejection>,
    query: Result<Query<FindQuery>, QueryRejection>,
) -> Result<Json<Entry>, ApiError> {
    let Path(id) = id?;
    let Query(query) = query?;

    let bin = get_bin(&manager, id)?;
    let index = bin.index().read().await;

    match index.find(&query.path) {
        Some(entry) => Ok(Json(entry.as_ref().clone())),
        None => Err(ApiError::not_found(format!(
            "no entry at {:?} in virtual bin {}",
            query.path, id
        ))),
    }
}

fn get_bin(manager: &Manager, id: usize) -> Result<&VirtualBin, ApiError> {
    match manager.virtual_bin(id) {
        Some(bin) => Ok(bin),
        None => {
            tracing::debug!("requested unknown virtual bin {}", id);
            Err(ApiError::not_found(format!("virtual bin {} does not exist", id)))
        }
    }
}
