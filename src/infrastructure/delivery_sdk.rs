use crate::{DeliveryError, Insertion, PagingInfo, Request, Response, StdResult};

/// Ranks a request in process, keeping the caller's insertion order.
///
/// Used when a request is only logged, or when the Delivery API cannot be reached.
#[derive(Debug, Default, Clone)]
pub struct SdkDelivery;

impl SdkDelivery {
    /// Creates a new `SdkDelivery` instance.
    pub fn new() -> Self {
        Self
    }

    /// Applies the request paging to its insertions.
    ///
    /// `retrieval_insertion_offset` is the absolute position of the first insertion of the
    /// request, so that a page starting at `offset` begins at index
    /// `offset - retrieval_insertion_offset`.
    pub fn run_delivery(
        &self,
        request: &Request,
        retrieval_insertion_offset: u64,
    ) -> StdResult<Response> {
        let paging = request.paging.clone().unwrap_or_default();
        let offset = match (&paging.cursor, paging.offset) {
            (Some(cursor), _) if !cursor.is_empty() => cursor.parse::<u64>().map_err(|e| {
                DeliveryError::InvalidRequest(format!("cursor {cursor:?} is not an offset: {e}"))
            })?,
            (_, Some(offset)) => offset.max(0) as u64,
            _ => 0,
        };
        if offset < retrieval_insertion_offset {
            return Err(DeliveryError::InvalidRequest(format!(
                "paging offset {offset} is before the retrieval insertion offset {retrieval_insertion_offset}"
            ))
            .into());
        }
        let start = (offset - retrieval_insertion_offset) as usize;
        let size = match paging.size {
            size if size > 0 => size as usize,
            _ => request.insertion.len(),
        };

        let insertion = request
            .insertion
            .iter()
            .skip(start)
            .take(size)
            .zip(offset..)
            .map(|(insertion, position)| Insertion {
                content_id: insertion.content_id.clone(),
                insertion_id: uuid::Uuid::new_v4().to_string(),
                position: Some(position),
                properties: None,
            })
            .collect::<Vec<_>>();
        let next_offset = offset + insertion.len() as u64;

        Ok(Response {
            request_id: uuid::Uuid::new_v4().to_string(),
            insertion,
            paging_info: Some(PagingInfo {
                paging_id: paging.paging_id,
                cursor: next_offset.to_string(),
            }),
        })
    }
}
