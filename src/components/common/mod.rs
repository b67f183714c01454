//! Small shared components and helpers.

use leptos::*;

/// Badge classes per cita estado.
pub fn clase_estado_cita(estado: &str) -> &'static str {
    match estado {
        "PENDIENTE" => "bg-yellow-100 text-yellow-700",
        "CONFIRMADA" => "bg-blue-100 text-blue-700",
        "FINALIZADA" => "bg-green-100 text-green-700",
        "CANCELADA" => "bg-red-100 text-red-700",
        _ => "bg-slate-100 text-slate-600",
    }
}

/// Colored pill for a cita estado.
#[component]
pub fn EstadoCitaBadge(#[prop(into)] estado: String) -> impl IntoView {
    let clase = clase_estado_cita(&estado);
    view! {
        <span class=format!("px-2 py-0.5 rounded-full text-xs font-medium {clase}")>
            {estado}
        </span>
    }
}

/// `wa.me` deep link for a phone number; strips everything non-numeric.
pub fn whatsapp_link(telefono: &str) -> String {
    let digitos: String = telefono.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://wa.me/{digitos}")
}

/// Page navigation for lists sliced client-side.
#[component]
pub fn Paginacion(
    pagina: ReadSignal<usize>,
    set_pagina: WriteSignal<usize>,
    /// total number of items
    #[prop(into)]
    total: Signal<usize>,
    /// items per page
    por_pagina: usize,
) -> impl IntoView {
    let paginas = move || total.get().div_ceil(por_pagina).max(1);
    view! {
        <div class="flex items-center justify-end gap-2 mt-3 text-sm">
            {move || (paginas() > 1).then(|| view! {
                <button
                    class="px-2 py-1 rounded border border-slate-200 text-slate-600 disabled:opacity-40"
                    disabled=move || pagina.get() == 0
                    on:click=move |_| set_pagina.update(|p| *p = p.saturating_sub(1))
                >
                    "Anterior"
                </button>
                <span class="text-slate-500">
                    {move || format!("{} / {}", pagina.get() + 1, paginas())}
                </span>
                <button
                    class="px-2 py-1 rounded border border-slate-200 text-slate-600 disabled:opacity-40"
                    disabled=move || pagina.get() + 1 >= paginas()
                    on:click=move |_| set_pagina.update(|p| *p += 1)
                >
                    "Siguiente"
                </button>
            })}
        </div>
    }
}

/// Inline error banner used across forms and lists.
#[component]
pub fn ErrorBanner(#[prop(into)] mensaje: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || mensaje.get().map(|m| view! {
            <div class="p-3 bg-red-50 border border-red-200 rounded-lg text-red-600 text-sm mb-4">
                {m}
            </div>
        })}
    }
}

/// Centered loading placeholder.
#[component]
pub fn Cargando() -> impl IntoView {
    view! {
        <div class="text-center py-12 text-slate-400">"Cargando..."</div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whatsapp_link_filtra_no_numericos() {
        assert_eq!(
            whatsapp_link("+54 9 (11) 5555-1234"),
            "https://wa.me/5491155551234"
        );
        assert_eq!(whatsapp_link("1155551234"), "https://wa.me/1155551234");
    }

    #[test]
    fn clase_estado_desconocido_es_neutral() {
        assert_eq!(clase_estado_cita("OTRO"), "bg-slate-100 text-slate-600");
        assert_eq!(clase_estado_cita("PENDIENTE"), "bg-yellow-100 text-yellow-700");
    }
}
